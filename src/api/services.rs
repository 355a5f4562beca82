use super::ServiceRepository;
use crate::error::ApiError;
use crate::models::{ServiceInstance, ServiceOfferingFields, ServicePlanFields};
use crate::net::resources::{list_all_resources, Resource};
use crate::net::{Gateway, GatewayRequest};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct ServiceInstanceEntity {
    name: String,
    #[serde(default)]
    service_plan_guid: Option<String>,
    #[serde(default)]
    service_plan: Option<Resource<ServicePlanEntity>>,
}

#[derive(Debug, Deserialize)]
struct ServicePlanEntity {
    #[serde(default)]
    name: String,
    #[serde(default)]
    service: Option<Resource<ServiceEntity>>,
}

#[derive(Debug, Deserialize)]
struct ServiceEntity {
    #[serde(default)]
    label: String,
    #[serde(default)]
    requires: Vec<String>,
}

pub struct CloudControllerServiceRepository {
    gateway: Arc<dyn Gateway>,
}

impl CloudControllerServiceRepository {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

impl ServiceRepository for CloudControllerServiceRepository {
    fn find_instance_by_name(
        &self,
        name: &str,
        space_guid: &str,
    ) -> Result<ServiceInstance, ApiError> {
        let request = GatewayRequest::new(
            "GET",
            format!("/v2/spaces/{}/service_instances", space_guid),
        )
        .with_query("return_user_provided_service_instances", "true")
        .with_query("q", format!("name:{}", name))
        .with_query("inline-relations-depth", "2");

        let resources: Vec<Resource<ServiceInstanceEntity>> =
            list_all_resources(self.gateway.as_ref(), request)?;
        let found = resources
            .into_iter()
            .find(|r| r.entity.name == name)
            .ok_or_else(|| ApiError::not_found("Service instance", name))?;

        let mut instance = ServiceInstance {
            guid: found.metadata.guid,
            name: found.entity.name,
            ..Default::default()
        };
        if let Some(plan) = found.entity.service_plan {
            instance.service_plan = ServicePlanFields {
                guid: plan.metadata.guid,
                name: plan.entity.name,
            };
            if let Some(service) = plan.entity.service {
                instance.service_offering = ServiceOfferingFields {
                    guid: service.metadata.guid,
                    label: service.entity.label,
                    requires: service.entity.requires,
                };
            }
        } else if let Some(plan_guid) = found.entity.service_plan_guid {
            instance.service_plan.guid = plan_guid;
        }
        Ok(instance)
    }
}
