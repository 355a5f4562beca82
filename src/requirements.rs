//! Requirements: pre-flight checks a command must pass before it performs its action.
//!
//! A requirement performs at most one lookup and caches what it resolved, so the command
//! that declared it can read the result after the runner has executed it. Typed
//! sub-traits expose those cached values; before `execute` runs they return the
//! default (empty) value.

use crate::error::ApiError;
use crate::models::{Application, DomainFields, ServiceInstance};
use std::sync::Arc;

mod application;
mod diego_application;
mod domain;
mod factory;
mod login;
mod min_api_version;
mod service_instance;
mod targeting;
mod usage;

pub use application::ApplicationApiRequirement;
pub use diego_application::DiegoApplicationApiRequirement;
pub use domain::DomainApiRequirement;
pub use factory::{ApiRequirementsFactory, RequirementsFactory};
pub use login::LoginRequirement;
pub use min_api_version::MinApiVersionRequirement;
pub use service_instance::ServiceInstanceApiRequirement;
pub use targeting::{TargetedOrgRequirement, TargetedSpaceRequirement};
pub use usage::UsageRequirement;

pub trait Requirement: Send + Sync {
    fn execute(&self) -> Result<(), ApiError>;
}

/// Erase a typed requirement handle into a plain `Arc<dyn Requirement>`.
pub trait IntoRequirement {
    fn into_requirement(self: Arc<Self>) -> Arc<dyn Requirement>;
}

impl<T: Requirement + 'static> IntoRequirement for T {
    fn into_requirement(self: Arc<Self>) -> Arc<dyn Requirement> {
        self
    }
}

pub trait DomainRequirement: Requirement + IntoRequirement {
    fn get_domain(&self) -> DomainFields;
}

pub trait ServiceInstanceRequirement: Requirement + IntoRequirement {
    fn get_service_instance(&self) -> ServiceInstance;
}

pub trait ApplicationRequirement: Requirement + IntoRequirement {
    fn get_application(&self) -> Application;
}

pub trait DiegoApplicationRequirement: Requirement + IntoRequirement {
    fn get_application(&self) -> Application;
}

/// Execute requirements in order, stopping at the first failure.
pub fn run_requirements(requirements: &[Arc<dyn Requirement>]) -> Result<(), ApiError> {
    for requirement in requirements {
        requirement.execute()?;
    }
    Ok(())
}
