use super::{DomainRequirement, Requirement};
use crate::api::DomainRepository;
use crate::config::CfConfig;
use crate::error::ApiError;
use crate::models::DomainFields;
use parking_lot::Mutex;
use std::sync::Arc;

/// Resolves a domain by name within the targeted org.
pub struct DomainApiRequirement {
    name: String,
    config: Arc<CfConfig>,
    repo: Arc<dyn DomainRepository>,
    domain: Mutex<DomainFields>,
}

impl DomainApiRequirement {
    pub fn new(name: impl Into<String>, config: Arc<CfConfig>, repo: Arc<dyn DomainRepository>) -> Self {
        Self {
            name: name.into(),
            config,
            repo,
            domain: Mutex::new(DomainFields::default()),
        }
    }
}

impl Requirement for DomainApiRequirement {
    fn execute(&self) -> Result<(), ApiError> {
        let org = self.config.organization().ok_or(ApiError::NoOrgTargeted)?;
        let domain = self.repo.find_by_name_in_org(&self.name, &org.guid)?;
        *self.domain.lock() = domain;
        Ok(())
    }
}

impl DomainRequirement for DomainApiRequirement {
    fn get_domain(&self) -> DomainFields {
        self.domain.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EntityRef;
    use crate::testing::FakeDomainRepository;

    fn targeted_config() -> Arc<CfConfig> {
        let mut config = CfConfig::default();
        config.session.organization = Some(EntityRef {
            guid: "org-guid".to_string(),
            name: "my-org".to_string(),
        });
        Arc::new(config)
    }

    #[test]
    fn test_caches_domain_after_execute() {
        let repo = Arc::new(FakeDomainRepository::new());
        repo.insert(DomainFields {
            guid: "domain-guid".to_string(),
            name: "example.com".to_string(),
            shared: true,
        });
        let requirement = DomainApiRequirement::new("example.com", targeted_config(), repo.clone());

        assert_eq!(requirement.get_domain(), DomainFields::default());
        requirement.execute().unwrap();
        assert_eq!(requirement.get_domain().guid, "domain-guid");
        assert_eq!(
            repo.lookups(),
            vec![("example.com".to_string(), "org-guid".to_string())]
        );
    }

    #[test]
    fn test_missing_domain_fails() {
        let repo = Arc::new(FakeDomainRepository::new());
        let requirement = DomainApiRequirement::new("nope.com", targeted_config(), repo);
        let err = requirement.execute().unwrap_err();
        assert_eq!(err.to_string(), "Domain nope.com not found");
        assert_eq!(requirement.get_domain(), DomainFields::default());
    }

    #[test]
    fn test_requires_targeted_org() {
        let repo = Arc::new(FakeDomainRepository::new());
        let requirement =
            DomainApiRequirement::new("example.com", Arc::new(CfConfig::default()), repo.clone());
        assert!(matches!(requirement.execute(), Err(ApiError::NoOrgTargeted)));
        assert!(repo.lookups().is_empty());
    }
}
