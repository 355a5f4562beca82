use super::Requirement;
use crate::config::CfConfig;
use crate::error::ApiError;
use std::sync::Arc;

pub struct LoginRequirement {
    config: Arc<CfConfig>,
}

impl LoginRequirement {
    pub fn new(config: Arc<CfConfig>) -> Self {
        Self { config }
    }
}

impl Requirement for LoginRequirement {
    fn execute(&self) -> Result<(), ApiError> {
        if self.config.is_logged_in() {
            Ok(())
        } else {
            Err(ApiError::NotLoggedIn)
        }
    }
}
