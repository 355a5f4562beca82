//! Shared test utilities for integration tests
//!
//! `MockCloudController` runs a wiremock server on its own multi-thread runtime so the
//! synchronous gateway can be driven from plain `#[test]` functions.

use cfctl::config::{CfConfig, EntityRef};
use cfctl::net::{CloudControllerGateway, Gateway};
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

pub struct MockCloudController {
    // Declared before the runtime so the server drops while the runtime is alive.
    server: MockServer,
    runtime: Runtime,
}

impl MockCloudController {
    pub fn start() -> Self {
        let runtime = Runtime::new().expect("failed to build test runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// Panics if any mock's expectation was not met.
    pub fn verify(&self) {
        self.runtime.block_on(self.server.verify());
    }

    pub fn received_request_count(&self) -> usize {
        self.runtime
            .block_on(self.server.received_requests())
            .map(|requests| requests.len())
            .unwrap_or(0)
    }

    /// Logged-in session targeting `my-org` / `my-space` against this server.
    pub fn config(&self) -> Arc<CfConfig> {
        let mut config = CfConfig::default();
        config.target.api_endpoint = self.uri();
        config.target.api_version = Some("2.51.0".to_string());
        config.session.access_token = "bearer test-token".to_string();
        config.session.username = "my-user".to_string();
        config.session.organization = Some(EntityRef {
            guid: "my-org-guid".to_string(),
            name: "my-org".to_string(),
        });
        config.session.space = Some(EntityRef {
            guid: "my-space-guid".to_string(),
            name: "my-space".to_string(),
        });
        Arc::new(config)
    }

    pub fn gateway(&self, config: Arc<CfConfig>) -> Arc<dyn Gateway> {
        Arc::new(CloudControllerGateway::new(config).expect("failed to build gateway"))
    }
}

/// Serializes access to `CFCTL__*` variables across tests in this binary.
static CFCTL_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with the given environment variables set, restoring the previous values after.
/// Config-loading tests call this even with no variables so they never observe another
/// test's overrides.
pub fn with_cfctl_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = CFCTL_ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let previous: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    for (key, value) in previous {
        match value {
            Some(value) => std::env::set_var(&key, value),
            None => std::env::remove_var(&key),
        }
    }
    match result {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
