//! In-memory doubles for the gateway, repositories, requirements and UI.
//!
//! Shared by unit tests and the integration suite. Every fake records the calls it
//! receives so tests can assert on exactly what a command asked for.

use crate::api::{
    ApplicationRepository, CurlRepository, CurlResponse, DomainRepository,
    RouteRepository, RouteServiceBindingRepository, ServiceBrokerRepository, ServiceRepository,
};
use crate::config::{CfConfig, EntityRef};
use crate::error::{ApiError, HttpError};
use crate::models::{Application, DomainFields, Route, ServiceBroker, ServiceInstance};
use crate::net::{Gateway, GatewayRequest, GatewayResponse};
use crate::requirements::{
    ApplicationRequirement, DiegoApplicationRequirement, DomainRequirement, Requirement,
    RequirementsFactory, ServiceInstanceRequirement,
};
use crate::terminal::Ui;
use parking_lot::Mutex;
use semver::Version;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A logged-in session targeting `my-org` / `my-space` on API 2.51.0.
pub fn targeted_config() -> Arc<CfConfig> {
    let mut config = CfConfig::default();
    config.target.api_endpoint = "https://api.example.com".to_string();
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

/// Failure a fake should produce; kept as data because `ApiError` is not `Clone`.
#[derive(Debug, Clone)]
enum CannedError {
    Http(HttpError),
    Message(String),
}

impl CannedError {
    fn to_error(&self) -> ApiError {
        match self {
            CannedError::Http(err) => ApiError::Http(err.clone()),
            CannedError::Message(message) => ApiError::Transport(message.clone()),
        }
    }
}

fn canned(slot: &Mutex<Option<CannedError>>) -> Result<(), ApiError> {
    match slot.lock().as_ref() {
        Some(err) => Err(err.to_error()),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// Replays queued responses in order and records every request.
///
/// When the queue is empty it answers `200 {}`.
#[derive(Default)]
pub struct FakeGateway {
    responses: Mutex<VecDeque<Result<GatewayResponse, String>>>,
    requests: Mutex<Vec<GatewayRequest>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: GatewayResponse) {
        self.responses.lock().push_back(Ok(response));
    }

    pub fn respond_json(&self, status: u16, body: &str) {
        self.respond(GatewayResponse {
            protocol: "HTTP/1.1".to_string(),
            status,
            reason: reason_phrase(status).to_string(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        });
    }

    pub fn respond_transport_error(&self, message: &str) {
        self.responses.lock().push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<GatewayRequest> {
        self.requests.lock().clone()
    }
}

impl Gateway for FakeGateway {
    fn perform(&self, request: GatewayRequest) -> Result<GatewayResponse, ApiError> {
        self.requests.lock().push(request);
        match self.responses.lock().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ApiError::Transport(message)),
            None => Ok(GatewayResponse {
                protocol: "HTTP/1.1".to_string(),
                status: 200,
                reason: "OK".to_string(),
                headers: Vec::new(),
                body: "{}".to_string(),
            }),
        }
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLookup {
    pub host: String,
    pub domain: String,
    pub path: String,
    pub port: u16,
}

#[derive(Default)]
pub struct FakeRouteRepository {
    route: Mutex<Route>,
    error: Mutex<Option<CannedError>>,
    lookups: Mutex<Vec<RouteLookup>>,
}

impl FakeRouteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_route(&self, route: Route) {
        *self.route.lock() = route;
    }

    pub fn fail_with(&self, message: &str) {
        *self.error.lock() = Some(CannedError::Message(message.to_string()));
    }

    pub fn lookups(&self) -> Vec<RouteLookup> {
        self.lookups.lock().clone()
    }
}

impl RouteRepository for FakeRouteRepository {
    fn find(
        &self,
        host: &str,
        domain: &DomainFields,
        path: &str,
        port: u16,
    ) -> Result<Route, ApiError> {
        self.lookups.lock().push(RouteLookup {
            host: host.to_string(),
            domain: domain.name.clone(),
            path: path.to_string(),
            port,
        });
        canned(&self.error)?;
        Ok(self.route.lock().clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingCall {
    pub service_instance_guid: String,
    pub route_guid: String,
    pub user_provided: bool,
    pub parameters: String,
}

#[derive(Default)]
pub struct FakeRouteServiceBindingRepository {
    error: Mutex<Option<CannedError>>,
    binds: Mutex<Vec<BindingCall>>,
    unbinds: Mutex<Vec<BindingCall>>,
}

impl FakeRouteServiceBindingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with_http(&self, err: HttpError) {
        *self.error.lock() = Some(CannedError::Http(err));
    }

    pub fn fail_with(&self, message: &str) {
        *self.error.lock() = Some(CannedError::Message(message.to_string()));
    }

    pub fn binds(&self) -> Vec<BindingCall> {
        self.binds.lock().clone()
    }

    pub fn unbinds(&self) -> Vec<BindingCall> {
        self.unbinds.lock().clone()
    }
}

impl RouteServiceBindingRepository for FakeRouteServiceBindingRepository {
    fn bind(
        &self,
        service_instance_guid: &str,
        route_guid: &str,
        user_provided: bool,
        parameters: &str,
    ) -> Result<(), ApiError> {
        self.binds.lock().push(BindingCall {
            service_instance_guid: service_instance_guid.to_string(),
            route_guid: route_guid.to_string(),
            user_provided,
            parameters: parameters.to_string(),
        });
        canned(&self.error)
    }

    fn unbind(
        &self,
        service_instance_guid: &str,
        route_guid: &str,
        user_provided: bool,
    ) -> Result<(), ApiError> {
        self.unbinds.lock().push(BindingCall {
            service_instance_guid: service_instance_guid.to_string(),
            route_guid: route_guid.to_string(),
            user_provided,
            parameters: String::new(),
        });
        canned(&self.error)
    }
}

#[derive(Default)]
pub struct FakeServiceBrokerRepository {
    brokers: Mutex<Vec<ServiceBroker>>,
    error: Mutex<Option<CannedError>>,
    calls: AtomicUsize,
}

impl FakeServiceBrokerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brokers(brokers: Vec<ServiceBroker>) -> Self {
        let repo = Self::default();
        *repo.brokers.lock() = brokers;
        repo
    }

    pub fn fail_with(&self, message: &str) {
        *self.error.lock() = Some(CannedError::Message(message.to_string()));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ServiceBrokerRepository for FakeServiceBrokerRepository {
    fn list_service_brokers(
        &self,
        callback: &mut dyn FnMut(ServiceBroker) -> bool,
    ) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        canned(&self.error)?;
        let brokers = self.brokers.lock().clone();
        for broker in brokers {
            if !callback(broker) {
                break;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeDomainRepository {
    domains: Mutex<Vec<DomainFields>>,
    lookups: Mutex<Vec<(String, String)>>,
}

impl FakeDomainRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, domain: DomainFields) {
        self.domains.lock().push(domain);
    }

    /// `(name, org_guid)` pairs in call order.
    pub fn lookups(&self) -> Vec<(String, String)> {
        self.lookups.lock().clone()
    }
}

impl DomainRepository for FakeDomainRepository {
    fn find_by_name_in_org(&self, name: &str, org_guid: &str) -> Result<DomainFields, ApiError> {
        self.lookups
            .lock()
            .push((name.to_string(), org_guid.to_string()));
        self.domains
            .lock()
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Domain", name))
    }
}

#[derive(Default)]
pub struct FakeServiceRepository {
    instances: Mutex<Vec<ServiceInstance>>,
}

impl FakeServiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, instance: ServiceInstance) {
        self.instances.lock().push(instance);
    }
}

impl ServiceRepository for FakeServiceRepository {
    fn find_instance_by_name(
        &self,
        name: &str,
        _space_guid: &str,
    ) -> Result<ServiceInstance, ApiError> {
        self.instances
            .lock()
            .iter()
            .find(|i| i.name == name)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Service instance", name))
    }
}

#[derive(Default)]
pub struct FakeApplicationRepository {
    applications: Mutex<Vec<Application>>,
    error: Mutex<Option<CannedError>>,
    reads: Mutex<Vec<String>>,
}

impl FakeApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, application: Application) {
        self.applications.lock().push(application);
    }

    pub fn fail_with(&self, message: &str) {
        *self.error.lock() = Some(CannedError::Message(message.to_string()));
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().clone()
    }
}

impl ApplicationRepository for FakeApplicationRepository {
    fn read(&self, name: &str, _space_guid: &str) -> Result<Application, ApiError> {
        self.reads.lock().push(name.to_string());
        canned(&self.error)?;
        self.applications
            .lock()
            .iter()
            .find(|a| a.name == name)
            .cloned()
            .ok_or_else(|| ApiError::not_found("App", name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurlCall {
    pub method: String,
    pub path: String,
    pub headers: String,
    pub body: String,
}

#[derive(Default)]
pub struct FakeCurlRepository {
    response: Mutex<CurlResponse>,
    error: Mutex<Option<CannedError>>,
    calls: Mutex<Vec<CurlCall>>,
}

impl FakeCurlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, response: CurlResponse) {
        *self.response.lock() = response;
    }

    pub fn fail_with(&self, message: &str) {
        *self.error.lock() = Some(CannedError::Message(message.to_string()));
    }

    pub fn calls(&self) -> Vec<CurlCall> {
        self.calls.lock().clone()
    }
}

impl CurlRepository for FakeCurlRepository {
    fn request(
        &self,
        method: &str,
        path: &str,
        headers: &str,
        body: &str,
    ) -> Result<CurlResponse, ApiError> {
        self.calls.lock().push(CurlCall {
            method: method.to_string(),
            path: path.to_string(),
            headers: headers.to_string(),
            body: body.to_string(),
        });
        canned(&self.error)?;
        Ok(self.response.lock().clone())
    }
}

// ---------------------------------------------------------------------------
// Requirements
// ---------------------------------------------------------------------------

/// A requirement with a fixed outcome that counts its executions.
pub struct FakeRequirement {
    name: String,
    error: Option<String>,
    executed: AtomicUsize,
}

impl FakeRequirement {
    pub fn passing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            error: None,
            executed: AtomicUsize::new(0),
        }
    }

    /// Fails with an error whose rendered message contains `message`.
    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            error: Some(message.to_string()),
            executed: AtomicUsize::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn execute_count(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }
}

impl Requirement for FakeRequirement {
    fn execute(&self) -> Result<(), ApiError> {
        self.executed.fetch_add(1, Ordering::SeqCst);
        match &self.error {
            Some(message) => Err(ApiError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

macro_rules! fake_value_requirement {
    ($name:ident, $value:ty, $field:ident, $trait_:ident, $getter:ident) => {
        pub struct $name {
            $field: $value,
            executed: AtomicUsize,
        }

        impl $name {
            pub fn new($field: $value) -> Self {
                Self {
                    $field,
                    executed: AtomicUsize::new(0),
                }
            }

            pub fn execute_count(&self) -> usize {
                self.executed.load(Ordering::SeqCst)
            }
        }

        impl Requirement for $name {
            fn execute(&self) -> Result<(), ApiError> {
                self.executed.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        impl $trait_ for $name {
            fn $getter(&self) -> $value {
                self.$field.clone()
            }
        }
    };
}

fake_value_requirement!(FakeDomainRequirement, DomainFields, domain, DomainRequirement, get_domain);
fake_value_requirement!(
    FakeServiceInstanceRequirement,
    ServiceInstance,
    instance,
    ServiceInstanceRequirement,
    get_service_instance
);
fake_value_requirement!(
    FakeApplicationRequirement,
    Application,
    application,
    ApplicationRequirement,
    get_application
);
fake_value_requirement!(
    FakeDiegoApplicationRequirement,
    Application,
    application,
    DiegoApplicationRequirement,
    get_application
);

/// Records which requirements a command asked for and hands back passing fakes.
///
/// Values returned by the typed requirements are configured up front. A single
/// kind can be made to fail with `fail_requirement`.
#[derive(Default)]
pub struct FakeRequirementsFactory {
    pub domain: DomainFields,
    pub service_instance: ServiceInstance,
    pub application: Application,
    failing: Mutex<Option<(String, String)>>,
    calls: Mutex<Vec<String>>,
    min_api_versions: Mutex<Vec<(String, Version)>>,
}

impl FakeRequirementsFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the requirement of `kind` (as recorded in `calls`) fail with `message`.
    pub fn fail_requirement(&self, kind: &str, message: &str) {
        *self.failing.lock() = Some((kind.to_string(), message.to_string()));
    }

    /// Requirement kinds in request order, e.g. `login`, `domain:example.com`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn min_api_versions(&self) -> Vec<(String, Version)> {
        self.min_api_versions.lock().clone()
    }

    fn record(&self, kind: String) -> Arc<dyn Requirement> {
        let failing = self.failing.lock().clone();
        self.calls.lock().push(kind.clone());
        match failing {
            Some((failing_kind, message)) if failing_kind == kind => {
                Arc::new(FakeRequirement::failing(&kind, &message))
            }
            _ => Arc::new(FakeRequirement::passing(&kind)),
        }
    }
}

impl RequirementsFactory for FakeRequirementsFactory {
    fn new_login_requirement(&self) -> Arc<dyn Requirement> {
        self.record("login".to_string())
    }

    fn new_targeted_org_requirement(&self) -> Arc<dyn Requirement> {
        self.record("targeted_org".to_string())
    }

    fn new_targeted_space_requirement(&self) -> Arc<dyn Requirement> {
        self.record("targeted_space".to_string())
    }

    fn new_min_api_version_requirement(
        &self,
        feature: &str,
        required: Version,
    ) -> Arc<dyn Requirement> {
        self.min_api_versions
            .lock()
            .push((feature.to_string(), required.clone()));
        self.record(format!("min_api_version:{}:{}", feature, required))
    }

    fn new_usage_requirement(&self, usage: &str, message: &str, failed: bool) -> Arc<dyn Requirement> {
        self.calls.lock().push("usage".to_string());
        Arc::new(crate::requirements::UsageRequirement::new(usage, message, failed))
    }

    fn new_domain_requirement(&self, name: &str) -> Arc<dyn DomainRequirement> {
        self.calls.lock().push(format!("domain:{}", name));
        Arc::new(FakeDomainRequirement::new(self.domain.clone()))
    }

    fn new_service_instance_requirement(&self, name: &str) -> Arc<dyn ServiceInstanceRequirement> {
        self.calls.lock().push(format!("service_instance:{}", name));
        Arc::new(FakeServiceInstanceRequirement::new(self.service_instance.clone()))
    }

    fn new_application_requirement(&self, name: &str) -> Arc<dyn ApplicationRequirement> {
        self.calls.lock().push(format!("application:{}", name));
        Arc::new(FakeApplicationRequirement::new(self.application.clone()))
    }

    fn new_diego_application_requirement(
        &self,
        name: &str,
    ) -> Arc<dyn DiegoApplicationRequirement> {
        self.calls.lock().push(format!("diego_application:{}", name));
        Arc::new(FakeDiegoApplicationRequirement::new(self.application.clone()))
    }
}

// ---------------------------------------------------------------------------
// UI
// ---------------------------------------------------------------------------

/// Captures output lines instead of printing them.
///
/// `ok()` records `"OK"`, `failed()` records `"FAILED"` then the message, and a table
/// records its header line followed by one line per row, cells joined by two spaces.
pub struct FakeUi {
    pub outputs: Vec<String>,
    pub warnings: Vec<String>,
    pub prompts: Vec<String>,
    pub confirm_answer: bool,
}

impl FakeUi {
    pub fn new() -> Self {
        Self {
            outputs: Vec::new(),
            warnings: Vec::new(),
            prompts: Vec::new(),
            confirm_answer: true,
        }
    }

    pub fn answering(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            ..Self::new()
        }
    }

    pub fn output_contains(&self, needle: &str) -> bool {
        self.outputs.iter().any(|line| line.contains(needle))
    }
}

impl Default for FakeUi {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui for FakeUi {
    fn say(&mut self, message: &str) {
        self.outputs.extend(message.lines().map(str::to_string));
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
        self.outputs.push(message.to_string());
    }

    fn ok(&mut self) {
        self.outputs.push("OK".to_string());
    }

    fn failed(&mut self, message: &str) {
        self.outputs.push("FAILED".to_string());
        self.outputs.extend(message.lines().map(str::to_string));
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, ApiError> {
        self.prompts.push(prompt.to_string());
        Ok(self.confirm_answer)
    }

    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        self.outputs.push(headers.join("  "));
        for row in rows {
            self.outputs.push(row.join("  "));
        }
    }
}
