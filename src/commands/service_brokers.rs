use super::{Command, CommandDependencies, CommandMetadata, FlagContext};
use crate::api::ServiceBrokerRepository;
use crate::config::CfConfig;
use crate::error::ApiError;
use crate::models::ServiceBroker;
use crate::requirements::{Requirement, RequirementsFactory};
use crate::terminal::Ui;
use std::sync::Arc;
use tracing::debug;

pub struct ServiceBrokers {
    config: Arc<CfConfig>,
    repo: Arc<dyn ServiceBrokerRepository>,
}

impl ServiceBrokers {
    pub fn new(deps: &CommandDependencies) -> Self {
        Self {
            config: Arc::clone(&deps.config),
            repo: deps.repo_locator.service_broker_repository(),
        }
    }
}

impl Command for ServiceBrokers {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "service-brokers",
            short_name: "",
            description: "List service brokers",
            usage: vec!["cfctl service-brokers"],
            flags: Vec::new(),
        }
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementsFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Arc<dyn Requirement>>, ApiError> {
        Ok(vec![
            factory.new_usage_requirement(
                &self.metadata().usage_text(),
                "No argument required",
                !flags.args().is_empty(),
            ),
            factory.new_login_requirement(),
        ])
    }

    fn execute(&mut self, _flags: &FlagContext, ui: &mut dyn Ui) -> Result<(), ApiError> {
        ui.say(&format!(
            "Getting service brokers as {}...\n",
            self.config.username()
        ));

        let mut brokers: Vec<ServiceBroker> = Vec::new();
        self.repo.list_service_brokers(&mut |broker| {
            brokers.push(broker);
            true
        })?;
        brokers.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = brokers.len(), "Fetched service brokers");

        ui.ok();
        if brokers.is_empty() {
            ui.say("No service brokers found");
            return Ok(());
        }

        let rows: Vec<Vec<String>> = brokers
            .into_iter()
            .map(|broker| vec![broker.name, broker.url])
            .collect();
        ui.table(&["name", "url"], &rows);
        Ok(())
    }
}
