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
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Bind failures this command reports as success.
///
/// Matched on the exact (status, code) pair. The Cloud Controller repository only
/// produces `HttpError` for non-2xx responses, so over the network this entry never
/// matches; it applies to repositories that report 200 with a platform code.
const SUCCESS_REMAPS: &[(u16, &str)] = &[(
    200,
    error_codes::SERVICE_INSTANCE_ALREADY_BOUND_TO_SAME_ROUTE,
)];

const ROUTE_FORWARDING: &str = "route_forwarding";

pub struct BindRouteService {
    config: Arc<CfConfig>,
    route_repo: Arc<dyn RouteRepository>,
    binding_repo: Arc<dyn RouteServiceBindingRepository>,
    domain_req: Option<Arc<dyn DomainRequirement>>,
    service_instance_req: Option<Arc<dyn ServiceInstanceRequirement>>,
}

impl BindRouteService {
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

/// Literal JSON, or the contents of the file it names when that file exists.
pub(crate) fn parameters_from_flag(value: &str) -> Result<String, ApiError> {
    if !value.is_empty() && Path::new(value).is_file() {
        return Ok(std::fs::read_to_string(value)?);
    }
    Ok(value.to_string())
}

impl Command for BindRouteService {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "bind-route-service",
            short_name: "brs",
            description: "Bind a service instance to an HTTP route",
            usage: vec![
                "cfctl bind-route-service DOMAIN SERVICE_INSTANCE [--hostname HOSTNAME] [--path PATH] [--port PORT] [-c PARAMETERS_AS_JSON] [-f]",
                "",
                "EXAMPLES:",
                "   cfctl bind-route-service example.com myratelimiter --hostname myapp --path foo",
                "   cfctl bind-route-service example.com myratelimiter -c file.json",
                "   cfctl bind-route-service example.com myratelimiter -c '{\"valid\":\"json\"}'",
            ],
            flags: vec![
                FlagSpec::new(
                    "hostname",
                    FlagKind::String,
                    "Hostname used in combination with DOMAIN to specify the route to bind",
                )
                .with_short('n'),
                FlagSpec::new(
                    "path",
                    FlagKind::String,
                    "Path used in combination with HOSTNAME and DOMAIN to specify the route to bind",
                ),
                FlagSpec::new(
                    "port",
                    FlagKind::Int,
                    "Port used in combination with DOMAIN to specify a TCP route to bind",
                ),
                FlagSpec::new(
                    "c",
                    FlagKind::String,
                    "Valid JSON object containing service-specific configuration parameters, provided inline or in a file",
                ),
                FlagSpec::new("force", FlagKind::Bool, "Force binding without confirmation")
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
            factory.new_min_api_version_requirement("bind-route-service", Version::new(2, 51, 0)),
        ])
    }

    fn execute(&mut self, flags: &FlagContext, ui: &mut dyn Ui) -> Result<(), ApiError> {
        let domain = self
            .domain_req
            .as_ref()
            .ok_or_else(|| requirements_not_evaluated("bind-route-service"))?
            .get_domain();
        let service_instance = self
            .service_instance_req
            .as_ref()
            .ok_or_else(|| requirements_not_evaluated("bind-route-service"))?
            .get_service_instance();

        let port = port_flag(flags, &self.metadata())?;
        let parameters = parameters_from_flag(&flags.string("c"))?;
        let route = self.route_repo.find(
            &flags.string("hostname"),
            &domain,
            &flags.string("path"),
            port,
        )?;
        let url = route.url();

        let user_provided = service_instance.is_user_provided();
        if !user_provided && service_instance.requires(ROUTE_FORWARDING) && !flags.bool("force") {
            let prompt = format!(
                "Binding may cause requests for route {} to be altered by service instance {}. Do you want to proceed?",
                url, service_instance.name
            );
            if !ui.confirm(&prompt)? {
                ui.warn("Bind cancelled");
                return Ok(());
            }
        }

        ui.say(&format!(
            "Binding route {} to service instance {} in org {} / space {} as {}...",
            url,
            service_instance.name,
            self.config.organization().map_or("", |o| o.name.as_str()),
            self.config.space().map_or("", |s| s.name.as_str()),
            self.config.username(),
        ));

        match self
            .binding_repo
            .bind(&service_instance.guid, &route.guid, user_provided, &parameters)
        {
            Ok(()) => {}
            Err(err) if is_remapped_success(&err, SUCCESS_REMAPS) => {
                ui.warn(&format!(
                    "Route {} is already bound to service instance {}.",
                    url, service_instance.name
                ));
            }
            Err(err) => return Err(err),
        }

        info!(route = %url, service_instance = %service_instance.name, "Route bound");
        ui.ok();
        Ok(())
    }
}
