use super::{
    ApplicationApiRequirement, ApplicationRequirement, DiegoApplicationApiRequirement,
    DiegoApplicationRequirement, DomainApiRequirement, DomainRequirement, LoginRequirement,
    MinApiVersionRequirement, Requirement, ServiceInstanceApiRequirement,
    ServiceInstanceRequirement, TargetedOrgRequirement, TargetedSpaceRequirement,
    UsageRequirement,
};
use crate::api::RepositoryLocator;
use crate::config::CfConfig;
use semver::Version;
use std::sync::Arc;

/// Builds requirements for commands. Commands only see this trait, so tests can swap in
/// a recording fake.
pub trait RequirementsFactory {
    fn new_login_requirement(&self) -> Arc<dyn Requirement>;
    fn new_targeted_org_requirement(&self) -> Arc<dyn Requirement>;
    fn new_targeted_space_requirement(&self) -> Arc<dyn Requirement>;
    fn new_min_api_version_requirement(&self, feature: &str, required: Version)
        -> Arc<dyn Requirement>;
    fn new_usage_requirement(&self, usage: &str, message: &str, failed: bool)
        -> Arc<dyn Requirement>;
    fn new_domain_requirement(&self, name: &str) -> Arc<dyn DomainRequirement>;
    fn new_service_instance_requirement(&self, name: &str) -> Arc<dyn ServiceInstanceRequirement>;
    fn new_application_requirement(&self, name: &str) -> Arc<dyn ApplicationRequirement>;
    fn new_diego_application_requirement(&self, name: &str)
        -> Arc<dyn DiegoApplicationRequirement>;
}

pub struct ApiRequirementsFactory {
    config: Arc<CfConfig>,
    locator: RepositoryLocator,
}

impl ApiRequirementsFactory {
    pub fn new(config: Arc<CfConfig>, locator: RepositoryLocator) -> Self {
        Self { config, locator }
    }
}

impl RequirementsFactory for ApiRequirementsFactory {
    fn new_login_requirement(&self) -> Arc<dyn Requirement> {
        Arc::new(LoginRequirement::new(Arc::clone(&self.config)))
    }

    fn new_targeted_org_requirement(&self) -> Arc<dyn Requirement> {
        Arc::new(TargetedOrgRequirement::new(Arc::clone(&self.config)))
    }

    fn new_targeted_space_requirement(&self) -> Arc<dyn Requirement> {
        Arc::new(TargetedSpaceRequirement::new(Arc::clone(&self.config)))
    }

    fn new_min_api_version_requirement(
        &self,
        feature: &str,
        required: Version,
    ) -> Arc<dyn Requirement> {
        Arc::new(MinApiVersionRequirement::new(
            feature,
            required,
            Arc::clone(&self.config),
        ))
    }

    fn new_usage_requirement(&self, usage: &str, message: &str, failed: bool) -> Arc<dyn Requirement> {
        Arc::new(UsageRequirement::new(usage, message, failed))
    }

    fn new_domain_requirement(&self, name: &str) -> Arc<dyn DomainRequirement> {
        Arc::new(DomainApiRequirement::new(
            name,
            Arc::clone(&self.config),
            self.locator.domain_repository(),
        ))
    }

    fn new_service_instance_requirement(&self, name: &str) -> Arc<dyn ServiceInstanceRequirement> {
        Arc::new(ServiceInstanceApiRequirement::new(
            name,
            Arc::clone(&self.config),
            self.locator.service_repository(),
        ))
    }

    fn new_application_requirement(&self, name: &str) -> Arc<dyn ApplicationRequirement> {
        Arc::new(ApplicationApiRequirement::new(
            name,
            Arc::clone(&self.config),
            self.locator.application_repository(),
        ))
    }

    fn new_diego_application_requirement(
        &self,
        name: &str,
    ) -> Arc<dyn DiegoApplicationRequirement> {
        Arc::new(DiegoApplicationApiRequirement::new(
            name,
            Arc::clone(&self.config),
            self.locator.application_repository(),
        ))
    }
}
