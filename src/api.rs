//! Repositories: typed operations against the control-plane API.
//!
//! Each repository is a trait so commands and requirements can be exercised against
//! hand-written fakes; the Cloud Controller v2 implementations sit behind them.

use crate::error::ApiError;
use crate::models::{Application, DomainFields, Route, ServiceBroker, ServiceInstance};
use crate::net::Gateway;
use std::sync::Arc;

pub mod applications;
pub mod curl;
pub mod domains;
pub mod route_service_bindings;
pub mod routes;
pub mod service_brokers;
pub mod services;

pub use curl::{CloudControllerCurlRepository, CurlRepository, CurlResponse};

pub trait RouteRepository: Send + Sync {
    /// Find a route by host, domain, path and port. Empty host/path and port 0 mean "unset".
    fn find(&self, host: &str, domain: &DomainFields, path: &str, port: u16)
        -> Result<Route, ApiError>;
}

pub trait RouteServiceBindingRepository: Send + Sync {
    /// Bind a route to a service instance. `parameters` is JSON text or empty.
    fn bind(
        &self,
        service_instance_guid: &str,
        route_guid: &str,
        user_provided: bool,
        parameters: &str,
    ) -> Result<(), ApiError>;

    fn unbind(
        &self,
        service_instance_guid: &str,
        route_guid: &str,
        user_provided: bool,
    ) -> Result<(), ApiError>;
}

pub trait ServiceBrokerRepository: Send + Sync {
    /// Stream brokers to `callback` until it returns `false` or the listing ends.
    fn list_service_brokers(
        &self,
        callback: &mut dyn FnMut(ServiceBroker) -> bool,
    ) -> Result<(), ApiError>;
}

pub trait DomainRepository: Send + Sync {
    fn find_by_name_in_org(&self, name: &str, org_guid: &str) -> Result<DomainFields, ApiError>;
}

pub trait ServiceRepository: Send + Sync {
    fn find_instance_by_name(&self, name: &str, space_guid: &str)
        -> Result<ServiceInstance, ApiError>;
}

pub trait ApplicationRepository: Send + Sync {
    fn read(&self, name: &str, space_guid: &str) -> Result<Application, ApiError>;
}

/// Hands out the repositories commands and requirements depend on.
///
/// Built once at startup; individual repositories can be swapped with the `with_*` setters.
#[derive(Clone)]
pub struct RepositoryLocator {
    curl: Arc<dyn CurlRepository>,
    routes: Arc<dyn RouteRepository>,
    route_service_bindings: Arc<dyn RouteServiceBindingRepository>,
    service_brokers: Arc<dyn ServiceBrokerRepository>,
    domains: Arc<dyn DomainRepository>,
    services: Arc<dyn ServiceRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl RepositoryLocator {
    /// Cloud Controller implementations over a shared gateway.
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            curl: Arc::new(CloudControllerCurlRepository::new(Arc::clone(&gateway))),
            routes: Arc::new(routes::CloudControllerRouteRepository::new(Arc::clone(&gateway))),
            route_service_bindings: Arc::new(
                route_service_bindings::CloudControllerRouteServiceBindingRepository::new(
                    Arc::clone(&gateway),
                ),
            ),
            service_brokers: Arc::new(
                service_brokers::CloudControllerServiceBrokerRepository::new(Arc::clone(
                    &gateway,
                )),
            ),
            domains: Arc::new(domains::CloudControllerDomainRepository::new(Arc::clone(
                &gateway,
            ))),
            services: Arc::new(services::CloudControllerServiceRepository::new(Arc::clone(
                &gateway,
            ))),
            applications: Arc::new(applications::CloudControllerApplicationRepository::new(
                gateway,
            )),
        }
    }

    pub fn curl_repository(&self) -> Arc<dyn CurlRepository> {
        Arc::clone(&self.curl)
    }

    pub fn route_repository(&self) -> Arc<dyn RouteRepository> {
        Arc::clone(&self.routes)
    }

    pub fn route_service_binding_repository(&self) -> Arc<dyn RouteServiceBindingRepository> {
        Arc::clone(&self.route_service_bindings)
    }

    pub fn service_broker_repository(&self) -> Arc<dyn ServiceBrokerRepository> {
        Arc::clone(&self.service_brokers)
    }

    pub fn domain_repository(&self) -> Arc<dyn DomainRepository> {
        Arc::clone(&self.domains)
    }

    pub fn service_repository(&self) -> Arc<dyn ServiceRepository> {
        Arc::clone(&self.services)
    }

    pub fn application_repository(&self) -> Arc<dyn ApplicationRepository> {
        Arc::clone(&self.applications)
    }

    pub fn with_curl_repository(mut self, repo: Arc<dyn CurlRepository>) -> Self {
        self.curl = repo;
        self
    }

    pub fn with_route_repository(mut self, repo: Arc<dyn RouteRepository>) -> Self {
        self.routes = repo;
        self
    }

    pub fn with_route_service_binding_repository(
        mut self,
        repo: Arc<dyn RouteServiceBindingRepository>,
    ) -> Self {
        self.route_service_bindings = repo;
        self
    }

    pub fn with_service_broker_repository(mut self, repo: Arc<dyn ServiceBrokerRepository>) -> Self {
        self.service_brokers = repo;
        self
    }

    pub fn with_domain_repository(mut self, repo: Arc<dyn DomainRepository>) -> Self {
        self.domains = repo;
        self
    }

    pub fn with_service_repository(mut self, repo: Arc<dyn ServiceRepository>) -> Self {
        self.services = repo;
        self
    }

    pub fn with_application_repository(mut self, repo: Arc<dyn ApplicationRepository>) -> Self {
        self.applications = repo;
        self
    }
}
