use super::Requirement;
use crate::config::CfConfig;
use crate::error::ApiError;
use std::sync::Arc;

pub struct TargetedOrgRequirement {
    config: Arc<CfConfig>,
}

impl TargetedOrgRequirement {
    pub fn new(config: Arc<CfConfig>) -> Self {
        Self { config }
    }
}

impl Requirement for TargetedOrgRequirement {
    fn execute(&self) -> Result<(), ApiError> {
        self.config
            .organization()
            .map(|_| ())
            .ok_or(ApiError::NoOrgTargeted)
    }
}

/// A targeted space implies a targeted org; the org is checked first.
pub struct TargetedSpaceRequirement {
    config: Arc<CfConfig>,
}

impl TargetedSpaceRequirement {
    pub fn new(config: Arc<CfConfig>) -> Self {
        Self { config }
    }
}

impl Requirement for TargetedSpaceRequirement {
    fn execute(&self) -> Result<(), ApiError> {
        TargetedOrgRequirement::new(Arc::clone(&self.config)).execute()?;
        self.config
            .space()
            .map(|_| ())
            .ok_or(ApiError::NoSpaceTargeted)
    }
}
