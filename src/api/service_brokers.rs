use super::ServiceBrokerRepository;
use crate::error::ApiError;
use crate::models::ServiceBroker;
use crate::net::resources::list_paginated_resources;
use crate::net::{Gateway, GatewayRequest};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct ServiceBrokerEntity {
    name: String,
    #[serde(default)]
    broker_url: String,
    #[serde(default)]
    auth_username: String,
}

pub struct CloudControllerServiceBrokerRepository {
    gateway: Arc<dyn Gateway>,
}

impl CloudControllerServiceBrokerRepository {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

impl ServiceBrokerRepository for CloudControllerServiceBrokerRepository {
    fn list_service_brokers(
        &self,
        callback: &mut dyn FnMut(ServiceBroker) -> bool,
    ) -> Result<(), ApiError> {
        list_paginated_resources(
            self.gateway.as_ref(),
            GatewayRequest::new("GET", "/v2/service_brokers"),
            |resource: crate::net::resources::Resource<ServiceBrokerEntity>| {
                callback(ServiceBroker {
                    guid: resource.metadata.guid,
                    name: resource.entity.name,
                    url: resource.entity.broker_url,
                    username: resource.entity.auth_username,
                })
            },
        )
    }
}
