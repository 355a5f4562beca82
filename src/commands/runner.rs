use super::{Command, CommandRegistry, FlagContext};
use crate::error::ApiError;
use crate::requirements::{run_requirements, RequirementsFactory};
use crate::terminal::Ui;
use tracing::{debug, info, warn};

/// Dispatches invocations to registered commands through the requirement pipeline.
pub struct CommandRunner<'a> {
    registry: &'a mut CommandRegistry,
    factory: &'a dyn RequirementsFactory,
}

impl<'a> CommandRunner<'a> {
    pub fn new(registry: &'a mut CommandRegistry, factory: &'a dyn RequirementsFactory) -> Self {
        Self { registry, factory }
    }

    /// Run `name` and render any failure on `ui`. The returned error decides the exit status.
    pub fn run(&mut self, name: &str, flags: &FlagContext, ui: &mut dyn Ui) -> Result<(), ApiError> {
        let factory = self.factory;
        let result = match self.registry.find_mut(name) {
            Some(command) => run_command(command.as_mut(), factory, flags, ui),
            None => {
                let err = ApiError::UnknownCommand(name.to_string());
                ui.failed(&err.to_string());
                Err(err)
            }
        };
        match &result {
            Ok(()) => info!(command = name, "Command completed"),
            Err(e) => warn!(command = name, error = %e, "Command failed"),
        }
        result
    }
}

/// Run one command: flag check, requirements in order, then execute.
///
/// Stops at the first failing requirement; `execute` is only reached when every
/// requirement passed. Failures are rendered as `FAILED` plus the message.
pub fn run_command(
    command: &mut dyn Command,
    factory: &dyn RequirementsFactory,
    flags: &FlagContext,
    ui: &mut dyn Ui,
) -> Result<(), ApiError> {
    let result = pipeline(command, factory, flags, ui);
    if let Err(ref e) = result {
        ui.failed(&e.to_string());
    }
    result
}

fn pipeline(
    command: &mut dyn Command,
    factory: &dyn RequirementsFactory,
    flags: &FlagContext,
    ui: &mut dyn Ui,
) -> Result<(), ApiError> {
    let metadata = command.metadata();
    for flag in flags.set_flags() {
        if metadata.flag(flag).is_none() {
            return Err(metadata.usage_error(&format!("Unknown flag \"{}\"", flag)));
        }
    }

    let requirements = command.requirements(factory, flags)?;
    debug!(
        command = metadata.name,
        count = requirements.len(),
        "Evaluating requirements"
    );
    run_requirements(&requirements)?;
    command.execute(flags, ui)
}
