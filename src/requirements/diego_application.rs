use super::application::ApplicationApiRequirement;
use super::{DiegoApplicationRequirement, Requirement};
use crate::api::ApplicationRepository;
use crate::config::CfConfig;
use crate::error::ApiError;
use crate::models::Application;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Like the application requirement, but additionally fails for apps on the DEA backend.
///
/// The cached application stays at its zero value unless `execute` succeeded.
pub struct DiegoApplicationApiRequirement {
    lookup: ApplicationApiRequirement,
    application: Mutex<Application>,
}

impl DiegoApplicationApiRequirement {
    pub fn new(
        name: impl Into<String>,
        config: Arc<CfConfig>,
        repo: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            lookup: ApplicationApiRequirement::new(name, config, repo),
            application: Mutex::new(Application::default()),
        }
    }
}

impl Requirement for DiegoApplicationApiRequirement {
    fn execute(&self) -> Result<(), ApiError> {
        let application = self.lookup.read()?;
        if !application.diego {
            debug!(app = %application.name, "Application is not running on Diego");
            return Err(ApiError::UnsupportedBackend);
        }
        *self.application.lock() = application;
        Ok(())
    }
}

impl DiegoApplicationRequirement for DiegoApplicationApiRequirement {
    fn get_application(&self) -> Application {
        self.application.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{targeted_config, FakeApplicationRepository};

    fn app(diego: bool) -> Application {
        Application {
            guid: "the-app-guid".to_string(),
            name: "the-app-name".to_string(),
            diego,
            ..Default::default()
        }
    }

    #[test]
    fn test_application_is_zero_value_before_execute() {
        let repo = Arc::new(FakeApplicationRepository::new());
        repo.insert(app(true));
        let requirement = DiegoApplicationApiRequirement::new("the-app-name", targeted_config(), repo);
        assert_eq!(requirement.get_application(), Application::default());
    }

    #[test]
    fn test_diego_application_is_cached() {
        let repo = Arc::new(FakeApplicationRepository::new());
        repo.insert(app(true));
        let requirement =
            DiegoApplicationApiRequirement::new("the-app-name", targeted_config(), repo.clone());

        requirement.execute().unwrap();
        assert_eq!(requirement.get_application().guid, "the-app-guid");
        assert_eq!(repo.reads(), vec!["the-app-name".to_string()]);
    }

    #[test]
    fn test_dea_application_fails() {
        let repo = Arc::new(FakeApplicationRepository::new());
        repo.insert(app(false));
        let requirement = DiegoApplicationApiRequirement::new("the-app-name", targeted_config(), repo);

        let err = requirement.execute().unwrap_err();
        assert!(err.to_string().contains("The app is running on the DEA backend, which does not support this command."));
        assert_eq!(requirement.get_application(), Application::default());
    }

    #[test]
    fn test_lookup_error_is_passed_through() {
        let repo = Arc::new(FakeApplicationRepository::new());
        repo.fail_with("find-err");
        let requirement = DiegoApplicationApiRequirement::new("the-app-name", targeted_config(), repo);

        let err = requirement.execute().unwrap_err();
        assert!(err.to_string().contains("find-err"));
    }
}
