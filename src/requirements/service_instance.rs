use super::{Requirement, ServiceInstanceRequirement};
use crate::api::ServiceRepository;
use crate::config::CfConfig;
use crate::error::ApiError;
use crate::models::ServiceInstance;
use parking_lot::Mutex;
use std::sync::Arc;

/// Resolves a service instance by name within the targeted space.
pub struct ServiceInstanceApiRequirement {
    name: String,
    config: Arc<CfConfig>,
    repo: Arc<dyn ServiceRepository>,
    instance: Mutex<ServiceInstance>,
}

impl ServiceInstanceApiRequirement {
    pub fn new(name: impl Into<String>, config: Arc<CfConfig>, repo: Arc<dyn ServiceRepository>) -> Self {
        Self {
            name: name.into(),
            config,
            repo,
            instance: Mutex::new(ServiceInstance::default()),
        }
    }
}

impl Requirement for ServiceInstanceApiRequirement {
    fn execute(&self) -> Result<(), ApiError> {
        let space = self.config.space().ok_or(ApiError::NoSpaceTargeted)?;
        let instance = self.repo.find_instance_by_name(&self.name, &space.guid)?;
        *self.instance.lock() = instance;
        Ok(())
    }
}

impl ServiceInstanceRequirement for ServiceInstanceApiRequirement {
    fn get_service_instance(&self) -> ServiceInstance {
        self.instance.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EntityRef;
    use crate::testing::FakeServiceRepository;

    #[test]
    fn test_caches_instance_after_execute() {
        let mut config = CfConfig::default();
        config.session.space = Some(EntityRef {
            guid: "space-guid".to_string(),
            name: "dev".to_string(),
        });
        let repo = Arc::new(FakeServiceRepository::new());
        repo.insert(ServiceInstance {
            guid: "si-guid".to_string(),
            name: "my-service".to_string(),
            ..Default::default()
        });

        let requirement = ServiceInstanceApiRequirement::new("my-service", Arc::new(config), repo);
        assert_eq!(requirement.get_service_instance().guid, "");
        requirement.execute().unwrap();
        assert_eq!(requirement.get_service_instance().guid, "si-guid");
    }

    #[test]
    fn test_requires_targeted_space() {
        let repo = Arc::new(FakeServiceRepository::new());
        let requirement =
            ServiceInstanceApiRequirement::new("my-service", Arc::new(CfConfig::default()), repo);
        assert!(matches!(requirement.execute(), Err(ApiError::NoSpaceTargeted)));
    }
}
