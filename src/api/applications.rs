use super::ApplicationRepository;
use crate::error::ApiError;
use crate::models::Application;
use crate::net::resources::{list_all_resources, Resource};
use crate::net::{Gateway, GatewayRequest};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct ApplicationEntity {
    name: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    instances: u32,
    #[serde(default)]
    memory: u64,
    #[serde(default)]
    diego: bool,
    #[serde(default)]
    enable_ssh: bool,
}

pub struct CloudControllerApplicationRepository {
    gateway: Arc<dyn Gateway>,
}

impl CloudControllerApplicationRepository {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

impl ApplicationRepository for CloudControllerApplicationRepository {
    fn read(&self, name: &str, space_guid: &str) -> Result<Application, ApiError> {
        let request = GatewayRequest::new("GET", format!("/v2/spaces/{}/apps", space_guid))
            .with_query("q", format!("name:{}", name))
            .with_query("inline-relations-depth", "1");

        let resources: Vec<Resource<ApplicationEntity>> =
            list_all_resources(self.gateway.as_ref(), request)?;
        let found = resources
            .into_iter()
            .find(|r| r.entity.name == name)
            .ok_or_else(|| ApiError::not_found("App", name))?;

        Ok(Application {
            guid: found.metadata.guid,
            name: found.entity.name,
            state: found.entity.state,
            instances: found.entity.instances,
            memory: found.entity.memory,
            diego: found.entity.diego,
            enable_ssh: found.entity.enable_ssh,
        })
    }
}
