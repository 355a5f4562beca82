//! Cloud Controller v2 resource envelopes and JSON request helpers.

use super::{Gateway, GatewayRequest, GatewayResponse};
use crate::error::{ApiError, HttpError};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource<T> {
    #[serde(default)]
    pub metadata: Metadata,
    pub entity: T,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PaginatedResources<T> {
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource<T>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<i64>,
    description: Option<String>,
}

/// Build an [`HttpError`] from a non-2xx response.
pub fn http_error_from(response: &GatewayResponse) -> HttpError {
    match serde_json::from_str::<ErrorBody>(&response.body) {
        Ok(body) => HttpError::new(
            response.status,
            body.code.map(|c| c.to_string()).unwrap_or_default(),
            body.description
                .unwrap_or_else(|| response.body.trim().to_string()),
        ),
        Err(_) => HttpError::new(response.status, "", response.body.trim()),
    }
}

/// Pass 2xx responses through; turn anything else into `ApiError::Http`.
pub fn classify(response: GatewayResponse) -> Result<GatewayResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Http(http_error_from(&response)))
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

pub fn get_resource<T: DeserializeOwned>(
    gateway: &dyn Gateway,
    request: GatewayRequest,
) -> Result<T, ApiError> {
    let response = classify(gateway.perform(request)?)?;
    parse_body(&response.body)
}

/// Walk every page of a listing. The callback returns `false` to stop early.
pub fn list_paginated_resources<T, F>(
    gateway: &dyn Gateway,
    request: GatewayRequest,
    mut callback: F,
) -> Result<(), ApiError>
where
    T: DeserializeOwned,
    F: FnMut(Resource<T>) -> bool,
{
    let mut next = request;
    loop {
        let response = classify(gateway.perform(next)?)?;
        let page: PaginatedResources<T> = parse_body(&response.body)?;
        for resource in page.resources {
            if !callback(resource) {
                return Ok(());
            }
        }
        match page.next_url {
            Some(url) if !url.is_empty() => next = GatewayRequest::new("GET", url),
            _ => return Ok(()),
        }
    }
}

/// Collect every resource of a listing.
pub fn list_all_resources<T: DeserializeOwned>(
    gateway: &dyn Gateway,
    request: GatewayRequest,
) -> Result<Vec<Resource<T>>, ApiError> {
    let mut all = Vec::new();
    list_paginated_resources(gateway, request, |resource| {
        all.push(resource);
        true
    })?;
    Ok(all)
}

/// PUT/POST whose response body is not needed.
pub fn update_resource(gateway: &dyn Gateway, request: GatewayRequest) -> Result<(), ApiError> {
    classify(gateway.perform(request)?)?;
    Ok(())
}

pub fn delete_resource(gateway: &dyn Gateway, path: &str) -> Result<(), ApiError> {
    classify(gateway.perform(GatewayRequest::new("DELETE", path))?)?;
    Ok(())
}
