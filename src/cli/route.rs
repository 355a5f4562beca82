//! CLI route: run context wiring config, gateway, repositories and the command runner.

use crate::api::RepositoryLocator;
use crate::cli::help::invocation;
use crate::cli::parse::Commands;
use crate::commands::{CommandDependencies, CommandRegistry, CommandRunner};
use crate::config::{CfConfig, ConfigLoader};
use crate::error::ApiError;
use crate::net::{CloudControllerGateway, Gateway};
use crate::requirements::ApiRequirementsFactory;
use crate::terminal::Ui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Runtime context for CLI execution: configuration, command registry and requirement factory.
/// Built once per process from the config path using ConfigLoader only.
pub struct RunContext {
    config: Arc<CfConfig>,
    registry: CommandRegistry,
    factory: ApiRequirementsFactory,
}

impl RunContext {
    /// Create run context from an optional config path.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = Arc::new(ConfigLoader::load_with_override(config_path.as_deref())?);
        let gateway: Arc<dyn Gateway> = Arc::new(CloudControllerGateway::new(Arc::clone(&config))?);
        Ok(Self::with_locator(config, RepositoryLocator::new(gateway)))
    }

    /// Create run context over an existing repository locator.
    pub fn with_locator(config: Arc<CfConfig>, locator: RepositoryLocator) -> Self {
        let deps = CommandDependencies {
            config: Arc::clone(&config),
            repo_locator: locator.clone(),
        };
        Self {
            registry: CommandRegistry::with_defaults(&deps),
            factory: ApiRequirementsFactory::new(Arc::clone(&config), locator),
            config,
        }
    }

    pub fn config(&self) -> &CfConfig {
        &self.config
    }

    /// Execute a parsed command. Failures have already been rendered on `ui` when this returns.
    pub fn execute(&mut self, command: &Commands, ui: &mut dyn Ui) -> Result<(), ApiError> {
        let (name, flags) = invocation(command);
        debug!(command = name, "Dispatching command");
        CommandRunner::new(&mut self.registry, &self.factory).run(name, &flags, ui)
    }
}
