use super::{
    is_remapped_success, port_flag, requirements_not_evaluated, Command, CommandDependencies,
    CommandMetadata, FlagContext, FlagKind, FlagSpec,
};
use crate::api::{RouteRepository, RouteServiceBindingRepository};
use crate::config::CfConfig;
use crate::error::{error_codes, ApiError};
use crate::requirements::{
    DomainRequirement, Requirement, RequirementsFactory, ServiceInstanceRequirement,
};
use crate::terminal::Ui;
use semver::Version;
use std::sync::Arc;
use tracing::info;

/// Unbind failures this command reports as success.
const SUCCESS_REMAPS: &[(u16, &str)] = &[(400, error_codes::INVALID_RELATION)];

pub struct UnbindRouteService {
    config: Arc<CfConfig>,
    route_repo: Arc<dyn RouteRepository>,
    binding_repo: Arc<dyn RouteServiceBindingRepository>,
    domain_req: Option<Arc<dyn DomainRequirement>>,
    service_instance_req: Option<Arc<dyn ServiceInstanceRequirement>>,
}

impl UnbindRouteService {
    pub fn new(deps: &CommandDependencies) -> Self {
        Self {
            config: Arc::clone(&deps.config),
            route_repo: deps.repo_locator.route_repository(),
            binding_repo: deps.repo_locator.route_service_binding_repository(),
            domain_req: None,
            service_instance_req: None,
        }
    }
}

impl Command for UnbindRouteService {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "unbind-route-service",
            short_name: "urs",
            description: "Unbind a service instance from an HTTP route",
            usage: vec![
                "cfctl unbind-route-service DOMAIN SERVICE_INSTANCE [--hostname HOSTNAME] [--path PATH] [--port PORT] [-f]",
                "",
                "EXAMPLES:",
                "   cfctl unbind-route-service example.com myratelimiter --hostname myapp --path foo",
            ],
            flags: vec![
                FlagSpec::new(
                    "hostname",
                    FlagKind::String,
                    "Hostname used in combination with DOMAIN to specify the route to unbind",
                )
                .with_short('n'),
                FlagSpec::new(
                    "path",
                    FlagKind::String,
                    "Path used in combination with HOSTNAME and DOMAIN to specify the route to unbind",
                ),
                FlagSpec::new(
                    "port",
                    FlagKind::Int,
                    "Port used in combination with DOMAIN to specify a TCP route to unbind",
                ),
                FlagSpec::new("force", FlagKind::Bool, "Force unbinding without confirmation")
                    .with_short('f'),
            ],
        }
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementsFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Arc<dyn Requirement>>, ApiError> {
        if flags.args().len() != 2 {
            return Err(self
                .metadata()
                .usage_error("Requires DOMAIN and SERVICE_INSTANCE as arguments"));
        }

        let domain_req = factory.new_domain_requirement(&flags.args()[0]);
        let service_instance_req = factory.new_service_instance_requirement(&flags.args()[1]);
        self.domain_req = Some(Arc::clone(&domain_req));
        self.service_instance_req = Some(Arc::clone(&service_instance_req));

        Ok(vec![
            factory.new_login_requirement(),
            domain_req.into_requirement(),
            service_instance_req.into_requirement(),
            factory.new_min_api_version_requirement("unbind-route-service", Version::new(2, 51, 0)),
        ])
    }

    fn execute(&mut self, flags: &FlagContext, ui: &mut dyn Ui) -> Result<(), ApiError> {
        let domain = self
            .domain_req
            .as_ref()
            .ok_or_else(|| requirements_not_evaluated("unbind-route-service"))?
            .get_domain();
        let service_instance = self
            .service_instance_req
            .as_ref()
            .ok_or_else(|| requirements_not_evaluated("unbind-route-service"))?
            .get_service_instance();

        let port = port_flag(flags, &self.metadata())?;
        let route = self.route_repo.find(
            &flags.string("hostname"),
            &domain,
            &flags.string("path"),
            port,
        )?;
        let url = route.url();

        if !flags.bool("force") {
            let prompt = format!(
                "Unbinding may leave apps mapped to route {} vulnerable; e.g. if service instance {} provides authentication. Do you want to proceed?",
                url, service_instance.name
            );
            if !ui.confirm(&prompt)? {
                ui.warn("Unbind cancelled");
                return Ok(());
            }
        }

        ui.say(&format!(
            "Unbinding route {} from service instance {} in org {} / space {} as {}...",
            url,
            service_instance.name,
            self.config.organization().map_or("", |o| o.name.as_str()),
            self.config.space().map_or("", |s| s.name.as_str()),
            self.config.username(),
        ));

        match self.binding_repo.unbind(
            &service_instance.guid,
            &route.guid,
            service_instance.is_user_provided(),
        ) {
            Ok(()) => {}
            Err(err) if is_remapped_success(&err, SUCCESS_REMAPS) => {
                ui.warn(&format!(
                    "Route {} was not bound to service instance {}.",
                    url, service_instance.name
                ));
            }
            Err(err) => return Err(err),
        }

        info!(route = %url, service_instance = %service_instance.name, "Route unbound");
        ui.ok();
        Ok(())
    }
}
