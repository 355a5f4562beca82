//! ConfigLoader: the single entry point for building a `CfConfig`.

use super::merge_policy::builder_with_defaults;
use super::sources::{environment, global_file};
use super::CfConfig;
use crate::error::ApiError;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration: defaults, then the global config file, then environment.
    pub fn load() -> Result<CfConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder);
        let config: CfConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file instead of the global one.
    /// Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<CfConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?;
        let builder = global_file::add_file(builder, path, true)?;
        let builder = environment::add_to_builder(builder);
        let config: CfConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise from the default sources.
    pub fn load_with_override(path: Option<&Path>) -> Result<CfConfig, ApiError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
