use super::Requirement;
use crate::config::CfConfig;
use crate::error::ApiError;
use semver::Version;
use std::sync::Arc;

/// Fails when the target's API version is below `required` for `feature`.
pub struct MinApiVersionRequirement {
    feature: String,
    required: Version,
    config: Arc<CfConfig>,
}

impl MinApiVersionRequirement {
    pub fn new(feature: impl Into<String>, required: Version, config: Arc<CfConfig>) -> Self {
        Self {
            feature: feature.into(),
            required,
            config,
        }
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn required(&self) -> &Version {
        &self.required
    }
}

impl Requirement for MinApiVersionRequirement {
    fn execute(&self) -> Result<(), ApiError> {
        let current = self.config.api_version()?;
        match current {
            Some(current) if current >= self.required => Ok(()),
            current => Err(ApiError::ApiVersionTooLow {
                feature: self.feature.clone(),
                current: current
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                required: self.required.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirement(api_version: Option<&str>) -> MinApiVersionRequirement {
        let mut config = CfConfig::default();
        config.target.api_version = api_version.map(str::to_string);
        MinApiVersionRequirement::new(
            "bind-route-service",
            Version::new(2, 51, 0),
            Arc::new(config),
        )
    }

    #[test]
    fn test_equal_or_newer_version_passes() {
        assert!(requirement(Some("2.51.0")).execute().is_ok());
        assert!(requirement(Some("2.51.1")).execute().is_ok());
        assert!(requirement(Some("3.0.0")).execute().is_ok());
    }

    #[test]
    fn test_older_version_fails_with_feature_name() {
        let err = requirement(Some("2.50.9")).execute().unwrap_err();
        assert_eq!(
            err.to_string(),
            "bind-route-service requires CF API version 2.51.0+. Your target is 2.50.9."
        );
    }

    #[test]
    fn test_semantic_not_lexical_ordering() {
        // 2.100.0 sorts before 2.51.0 as a string but is newer.
        assert!(requirement(Some("2.100.0")).execute().is_ok());
    }

    #[test]
    fn test_unknown_version_fails() {
        let err = requirement(None).execute().unwrap_err();
        assert!(err.to_string().contains("Your target is unknown"));
    }
}
