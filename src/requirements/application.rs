use super::{ApplicationRequirement, Requirement};
use crate::api::ApplicationRepository;
use crate::config::CfConfig;
use crate::error::ApiError;
use crate::models::Application;
use parking_lot::Mutex;
use std::sync::Arc;

/// Resolves an application by name within the targeted space.
pub struct ApplicationApiRequirement {
    name: String,
    config: Arc<CfConfig>,
    repo: Arc<dyn ApplicationRepository>,
    application: Mutex<Application>,
}

impl ApplicationApiRequirement {
    pub fn new(
        name: impl Into<String>,
        config: Arc<CfConfig>,
        repo: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            repo,
            application: Mutex::new(Application::default()),
        }
    }

    pub(super) fn read(&self) -> Result<Application, ApiError> {
        let space = self.config.space().ok_or(ApiError::NoSpaceTargeted)?;
        self.repo.read(&self.name, &space.guid)
    }
}

impl Requirement for ApplicationApiRequirement {
    fn execute(&self) -> Result<(), ApiError> {
        let application = self.read()?;
        *self.application.lock() = application;
        Ok(())
    }
}

impl ApplicationRequirement for ApplicationApiRequirement {
    fn get_application(&self) -> Application {
        self.application.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{targeted_config, FakeApplicationRepository};

    #[test]
    fn test_caches_application() {
        let repo = Arc::new(FakeApplicationRepository::new());
        repo.insert(Application {
            guid: "app-guid".to_string(),
            name: "my-app".to_string(),
            ..Default::default()
        });
        let requirement = ApplicationApiRequirement::new("my-app", targeted_config(), repo);
        requirement.execute().unwrap();
        assert_eq!(requirement.get_application().guid, "app-guid");
    }

    #[test]
    fn test_unknown_application() {
        let repo = Arc::new(FakeApplicationRepository::new());
        let requirement = ApplicationApiRequirement::new("ghost", targeted_config(), repo);
        assert_eq!(
            requirement.execute().unwrap_err().to_string(),
            "App ghost not found"
        );
    }
}
