use super::{requirements_not_evaluated, Command, CommandDependencies, CommandMetadata, FlagContext};
use crate::error::ApiError;
use crate::requirements::{DiegoApplicationRequirement, Requirement, RequirementsFactory};
use crate::terminal::Ui;
use std::sync::Arc;

pub struct SshEnabled {
    app_req: Option<Arc<dyn DiegoApplicationRequirement>>,
}

impl SshEnabled {
    pub fn new(_deps: &CommandDependencies) -> Self {
        Self { app_req: None }
    }
}

impl Command for SshEnabled {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "ssh-enabled",
            short_name: "",
            description: "Reports whether SSH is enabled on an application container instance",
            usage: vec!["cfctl ssh-enabled APP_NAME"],
            flags: Vec::new(),
        }
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementsFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Arc<dyn Requirement>>, ApiError> {
        if flags.args().len() != 1 {
            return Err(self.metadata().usage_error("Requires APP_NAME as argument"));
        }
        let app_req = factory.new_diego_application_requirement(&flags.args()[0]);
        self.app_req = Some(Arc::clone(&app_req));

        Ok(vec![
            factory.new_login_requirement(),
            factory.new_targeted_space_requirement(),
            app_req.into_requirement(),
        ])
    }

    fn execute(&mut self, _flags: &FlagContext, ui: &mut dyn Ui) -> Result<(), ApiError> {
        let app = self
            .app_req
            .as_ref()
            .ok_or_else(|| requirements_not_evaluated("ssh-enabled"))?
            .get_application();
        let state = if app.enable_ssh { "enabled" } else { "disabled" };
        ui.say(&format!("ssh support is {} for '{}'", state, app.name));
        Ok(())
    }
}
