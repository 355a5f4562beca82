//! Control-plane HTTP gateway.
//!
//! The `Gateway` trait is the only seam between the CLI and the network. Repositories use
//! the JSON helpers in [`resources`], which classify HTTP failures into [`HttpError`]s; the
//! curl repository talks to the gateway directly and sees every response verbatim.
//!
//! [`HttpError`]: crate::error::HttpError

use crate::error::ApiError;

mod cloud_controller;
pub mod resources;

pub use cloud_controller::CloudControllerGateway;

/// An outbound request. `path` is relative to the API endpoint and may carry a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl GatewayRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A raw response: status line parts, headers in wire order, body untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayResponse {
    pub protocol: String,
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one blocking request against the control-plane API.
///
/// Only transport failures and malformed local input are errors; any HTTP status is
/// returned as a response.
pub trait Gateway: Send + Sync {
    fn perform(&self, request: GatewayRequest) -> Result<GatewayResponse, ApiError>;
}
