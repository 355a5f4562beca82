use super::{
    BindRouteService, Command, CommandDependencies, CommandMetadata, Curl, ServiceBrokers,
    SshEnabled, UnbindRouteService,
};
use std::collections::{BTreeMap, HashMap};

/// Command lookup by name or short name. Built once per process and passed to the runner.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn Command>>,
    aliases: HashMap<String, String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in command wired to `deps`.
    pub fn with_defaults(deps: &CommandDependencies) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(BindRouteService::new(deps)));
        registry.register(Box::new(UnbindRouteService::new(deps)));
        registry.register(Box::new(ServiceBrokers::new(deps)));
        registry.register(Box::new(Curl::new(deps)));
        registry.register(Box::new(SshEnabled::new(deps)));
        registry
    }

    /// Register `command`, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn Command>) {
        let metadata = command.metadata();
        if !metadata.short_name.is_empty() {
            self.aliases
                .insert(metadata.short_name.to_string(), metadata.name.to_string());
        }
        self.commands.insert(metadata.name.to_string(), command);
    }

    fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(self.resolve(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Box<dyn Command>> {
        let name = self.resolve(name).to_string();
        self.commands.get_mut(&name)
    }

    pub fn metadata(&self, name: &str) -> Option<CommandMetadata> {
        self.commands.get(self.resolve(name)).map(|c| c.metadata())
    }

    /// Registered command names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }
}
