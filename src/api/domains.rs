use super::DomainRepository;
use crate::error::ApiError;
use crate::models::DomainFields;
use crate::net::resources::{list_all_resources, Resource};
use crate::net::{Gateway, GatewayRequest};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct DomainEntity {
    name: String,
}

pub struct CloudControllerDomainRepository {
    gateway: Arc<dyn Gateway>,
}

impl CloudControllerDomainRepository {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    fn first_named(
        &self,
        path: String,
        name: &str,
    ) -> Result<Option<Resource<DomainEntity>>, ApiError> {
        let request = GatewayRequest::new("GET", path).with_query("q", format!("name:{}", name));
        let resources: Vec<Resource<DomainEntity>> =
            list_all_resources(self.gateway.as_ref(), request)?;
        Ok(resources.into_iter().find(|r| r.entity.name == name))
    }
}

impl DomainRepository for CloudControllerDomainRepository {
    /// Private domains of the org take precedence over shared domains.
    fn find_by_name_in_org(&self, name: &str, org_guid: &str) -> Result<DomainFields, ApiError> {
        let private_path = format!("/v2/organizations/{}/private_domains", org_guid);
        if let Some(found) = self.first_named(private_path, name)? {
            return Ok(DomainFields {
                guid: found.metadata.guid,
                name: found.entity.name,
                shared: false,
            });
        }
        if let Some(found) = self.first_named("/v2/shared_domains".to_string(), name)? {
            return Ok(DomainFields {
                guid: found.metadata.guid,
                name: found.entity.name,
                shared: true,
            });
        }
        Err(ApiError::not_found("Domain", name))
    }
}
