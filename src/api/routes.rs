use super::RouteRepository;
use crate::error::ApiError;
use crate::models::{DomainFields, Route};
use crate::net::resources::{get_resource, PaginatedResources};
use crate::net::{Gateway, GatewayRequest};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct RouteEntity {
    #[serde(default)]
    host: String,
    #[serde(default)]
    path: String,
    #[serde(default)]
    port: Option<u16>,
}

pub struct CloudControllerRouteRepository {
    gateway: Arc<dyn Gateway>,
}

impl CloudControllerRouteRepository {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

impl RouteRepository for CloudControllerRouteRepository {
    fn find(
        &self,
        host: &str,
        domain: &DomainFields,
        path: &str,
        port: u16,
    ) -> Result<Route, ApiError> {
        let mut request = GatewayRequest::new("GET", "/v2/routes")
            .with_query("q", format!("host:{}", host))
            .with_query("q", format!("domain_guid:{}", domain.guid));
        if !path.is_empty() {
            request = request.with_query("q", format!("path:{}", path));
        }
        if port != 0 {
            request = request.with_query("q", format!("port:{}", port));
        }

        let page: PaginatedResources<RouteEntity> =
            get_resource(self.gateway.as_ref(), request)?;
        let wanted = Route {
            host: host.to_string(),
            domain: domain.clone(),
            path: path.to_string(),
            port,
            ..Default::default()
        };
        let found = page
            .resources
            .into_iter()
            .find(|r| r.entity.host == host && r.entity.path == path)
            .ok_or_else(|| ApiError::not_found("Route", wanted.url()))?;

        Ok(Route {
            guid: found.metadata.guid,
            host: found.entity.host,
            domain: domain.clone(),
            path: found.entity.path,
            port: found.entity.port.unwrap_or(0),
        })
    }
}
