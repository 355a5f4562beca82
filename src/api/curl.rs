//! Raw request passthrough behind `cfctl curl`.
//!
//! Every HTTP status comes back as a successful call with the body untouched; only
//! malformed local input and transport failures are errors.

use crate::error::ApiError;
use crate::net::{Gateway, GatewayRequest, GatewayResponse};
use std::sync::Arc;
use tracing::debug;

/// Rendered response: status line plus headers, and the raw body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurlResponse {
    pub status: u16,
    pub headers: String,
    pub body: String,
}

pub trait CurlRepository: Send + Sync {
    /// Issue `method` against `path`. An empty method means POST when `body` is
    /// non-empty, GET otherwise. `headers` holds newline-separated `key: value` lines.
    fn request(
        &self,
        method: &str,
        path: &str,
        headers: &str,
        body: &str,
    ) -> Result<CurlResponse, ApiError>;
}

pub struct CloudControllerCurlRepository {
    gateway: Arc<dyn Gateway>,
}

impl CloudControllerCurlRepository {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

impl CurlRepository for CloudControllerCurlRepository {
    fn request(
        &self,
        method: &str,
        path: &str,
        headers: &str,
        body: &str,
    ) -> Result<CurlResponse, ApiError> {
        let method = resolve_method(method, body);
        let mut request = GatewayRequest::new(method, path);
        request.headers = parse_headers(headers)?;
        if !body.is_empty() {
            request.body = Some(body.to_string());
        }

        debug!(method = %request.method, path = %path, "Sending curl request");
        let response = self.gateway.perform(request)?;
        Ok(CurlResponse {
            status: response.status,
            headers: render_headers(&response),
            body: response.body,
        })
    }
}

pub fn resolve_method(method: &str, body: &str) -> String {
    if !method.is_empty() {
        method.to_string()
    } else if body.is_empty() {
        "GET".to_string()
    } else {
        "POST".to_string()
    }
}

/// Parse newline-separated `key: value` lines. Blank lines are skipped; a line without
/// a colon rejects the whole block.
pub fn parse_headers(raw: &str) -> Result<Vec<(String, String)>, ApiError> {
    let mut headers = Vec::new();
    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| ApiError::InvalidHeaders(line.trim().to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ApiError::InvalidHeaders(line.trim().to_string()));
        }
        headers.push((key.to_string(), value.trim().to_string()));
    }
    Ok(headers)
}

fn render_headers(response: &GatewayResponse) -> String {
    let protocol = if response.protocol.is_empty() {
        "HTTP/1.1"
    } else {
        response.protocol.as_str()
    };
    let mut rendered = format!("{} {} {}", protocol, response.status, response.reason)
        .trim_end()
        .to_string();
    rendered.push('\n');
    for (key, value) in &response.headers {
        rendered.push_str(&format!("{}: {}\n", canonical_header_name(key), value));
    }
    rendered
}

/// `content-type` -> `Content-Type`
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
