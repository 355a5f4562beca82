use super::Requirement;
use crate::error::ApiError;

/// Fails with an incorrect-usage error when the argument check it was built with failed.
pub struct UsageRequirement {
    usage: String,
    message: String,
    failed: bool,
}

impl UsageRequirement {
    pub fn new(usage: impl Into<String>, message: impl Into<String>, failed: bool) -> Self {
        Self {
            usage: usage.into(),
            message: message.into(),
            failed,
        }
    }
}

impl Requirement for UsageRequirement {
    fn execute(&self) -> Result<(), ApiError> {
        if !self.failed {
            return Ok(());
        }
        Err(ApiError::IncorrectUsage(format!(
            "{}\n\n{}",
            self.message, self.usage
        )))
    }
}
