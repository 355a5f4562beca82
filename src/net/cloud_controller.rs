//! Gateway implementation backed by `reqwest`, driven by a private current-thread runtime.

use super::{Gateway, GatewayRequest, GatewayResponse};
use crate::config::CfConfig;
use crate::error::ApiError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tracing::{debug, warn};

pub struct CloudControllerGateway {
    client: Client,
    runtime: Runtime,
    config: Arc<CfConfig>,
}

impl CloudControllerGateway {
    pub fn new(config: Arc<CfConfig>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.http.connect_timeout_secs))
            .timeout(Duration::from_secs(config.http.request_timeout_secs))
            .danger_accept_invalid_certs(config.target.skip_ssl_validation)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create runtime: {}", e)))?;

        Ok(Self {
            client,
            runtime,
            config,
        })
    }

    fn url_for(&self, path: &str) -> Result<String, ApiError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(path.to_string());
        }
        let endpoint = self.config.target.api_endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(ApiError::ConfigError(
                "No API endpoint set. Set target.api_endpoint in the config file.".to_string(),
            ));
        }
        if path.starts_with('/') {
            Ok(format!("{}{}", endpoint, path))
        } else {
            Ok(format!("{}/{}", endpoint, path))
        }
    }
}

impl Gateway for CloudControllerGateway {
    fn perform(&self, request: GatewayRequest) -> Result<GatewayResponse, ApiError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| ApiError::Transport(format!("Invalid HTTP method '{}'", request.method)))?;
        let url = self.url_for(&request.path)?;

        let mut builder = self.client.request(method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if self.config.is_logged_in() && request.header("authorization").is_none() {
            builder = builder.header(AUTHORIZATION, self.config.session.access_token.as_str());
        }
        if request.body.is_some() && request.header("content-type").is_none() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let started = Instant::now();
        let result = self.runtime.block_on(async move {
            let response = builder.send().await?;
            let protocol = format!("{:?}", response.version());
            let status = response.status();
            let headers = response
                .headers()
                .iter()
                .map(|(key, value)| {
                    (
                        key.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect::<Vec<_>>();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(GatewayResponse {
                protocol,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                headers,
                body,
            })
        });

        match result {
            Ok(response) => {
                debug!(
                    method = %method,
                    url = %url,
                    status = response.status,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Request completed"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(method = %method, url = %url, error = %e, "Request failed");
                Err(map_transport_error(e))
            }
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Transport(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::Transport(format!("Connection error: {}", error))
    } else if error.is_builder() {
        ApiError::Transport(format!("Invalid request: {}", error))
    } else {
        ApiError::Transport(error.to_string())
    }
}
