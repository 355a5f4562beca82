//! Merge rules: defaults applied beneath every other source.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("target.api_endpoint", "")?
        .set_default("target.skip_ssl_validation", false)?
        .set_default("http.connect_timeout_secs", 10)?
        .set_default("http.request_timeout_secs", 60)
}
