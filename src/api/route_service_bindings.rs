use super::RouteServiceBindingRepository;
use crate::error::ApiError;
use crate::net::resources::{delete_resource, update_resource};
use crate::net::{Gateway, GatewayRequest};
use serde_json::json;
use std::sync::Arc;

pub struct CloudControllerRouteServiceBindingRepository {
    gateway: Arc<dyn Gateway>,
}

impl CloudControllerRouteServiceBindingRepository {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

fn binding_path(service_instance_guid: &str, route_guid: &str, user_provided: bool) -> String {
    let collection = if user_provided {
        "user_provided_service_instances"
    } else {
        "service_instances"
    };
    format!(
        "/v2/{}/{}/routes/{}",
        collection, service_instance_guid, route_guid
    )
}

impl RouteServiceBindingRepository for CloudControllerRouteServiceBindingRepository {
    fn bind(
        &self,
        service_instance_guid: &str,
        route_guid: &str,
        user_provided: bool,
        parameters: &str,
    ) -> Result<(), ApiError> {
        let mut request = GatewayRequest::new(
            "PUT",
            binding_path(service_instance_guid, route_guid, user_provided),
        );
        if !parameters.trim().is_empty() {
            let parameters: serde_json::Value =
                serde_json::from_str(parameters).map_err(|_| ApiError::InvalidParameters)?;
            if !parameters.is_object() {
                return Err(ApiError::InvalidParameters);
            }
            request = request.with_body(json!({ "parameters": parameters }).to_string());
        }
        update_resource(self.gateway.as_ref(), request)
    }

    fn unbind(
        &self,
        service_instance_guid: &str,
        route_guid: &str,
        user_provided: bool,
    ) -> Result<(), ApiError> {
        delete_resource(
            self.gateway.as_ref(),
            &binding_path(service_instance_guid, route_guid, user_provided),
        )
    }
}
