//! Platform resource models shared by repositories, requirements and commands.

use serde::{Deserialize, Serialize};

/// An application as seen by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub guid: String,
    pub name: String,
    pub state: String,
    pub instances: u32,
    pub memory: u64,
    /// True when the app runs on the Diego backend rather than the DEA backend.
    pub diego: bool,
    pub enable_ssh: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFields {
    pub guid: String,
    pub name: String,
    pub shared: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub guid: String,
    pub host: String,
    pub domain: DomainFields,
    pub path: String,
    pub port: u16,
}

impl Route {
    /// Human-readable route address: `host.domain[:port][/path]`.
    pub fn url(&self) -> String {
        let mut url = if self.host.is_empty() {
            self.domain.name.clone()
        } else {
            format!("{}.{}", self.host, self.domain.name)
        };
        if self.port != 0 {
            url.push_str(&format!(":{}", self.port));
        }
        if !self.path.is_empty() {
            if !self.path.starts_with('/') {
                url.push('/');
            }
            url.push_str(&self.path);
        }
        url
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePlanFields {
    pub guid: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOfferingFields {
    pub guid: String,
    pub label: String,
    /// Capabilities the offering requires from the platform, e.g. `route_forwarding`.
    pub requires: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    pub guid: String,
    pub name: String,
    pub service_plan: ServicePlanFields,
    pub service_offering: ServiceOfferingFields,
}

impl ServiceInstance {
    /// User-provided instances are not backed by a managed plan.
    pub fn is_user_provided(&self) -> bool {
        self.service_plan.guid.is_empty()
    }

    pub fn requires(&self, capability: &str) -> bool {
        self.service_offering.requires.iter().any(|r| r == capability)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBroker {
    pub guid: String,
    pub name: String,
    pub url: String,
    pub username: String,
}
