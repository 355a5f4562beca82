//! Commands and the requirement-gated pipeline that runs them.
//!
//! A command declares its flags and the requirements it needs for one invocation. The
//! runner evaluates those requirements in order, stops at the first failure and only
//! then calls `execute`. Errors are returned, never printed by the command itself;
//! the runner renders them as a failure.

use crate::api::RepositoryLocator;
use crate::config::CfConfig;
use crate::error::ApiError;
use crate::requirements::{Requirement, RequirementsFactory};
use crate::terminal::Ui;
use std::fmt::Write as _;
use std::sync::Arc;

mod bind_route_service;
mod curl;
mod flags;
mod registry;
mod runner;
mod service_brokers;
mod ssh_enabled;
mod unbind_route_service;

pub use bind_route_service::BindRouteService;
pub use curl::{format_curl_body, Curl};
pub use flags::FlagContext;
pub use registry::CommandRegistry;
pub use runner::{run_command, CommandRunner};
pub use service_brokers::ServiceBrokers;
pub use ssh_enabled::SshEnabled;
pub use unbind_route_service::UnbindRouteService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    String,
    /// Repeatable string flag.
    StringSlice,
    Int,
    Bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: &'static str,
    pub short: Option<char>,
    pub usage: &'static str,
    pub kind: FlagKind,
}

impl FlagSpec {
    pub fn new(name: &'static str, kind: FlagKind, usage: &'static str) -> Self {
        Self {
            name,
            short: None,
            usage,
            kind,
        }
    }

    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Flag as typed on the command line: `-c` for one-letter names, `--name` otherwise.
    pub fn display_name(&self) -> String {
        let long = if self.name.chars().count() == 1 {
            format!("-{}", self.name)
        } else {
            format!("--{}", self.name)
        };
        match self.short {
            Some(short) => format!("{}, -{}", long, short),
            None => long,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMetadata {
    pub name: &'static str,
    pub short_name: &'static str,
    pub description: &'static str,
    pub usage: Vec<&'static str>,
    pub flags: Vec<FlagSpec>,
}

impl CommandMetadata {
    pub fn flag(&self, name: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| f.name == name)
    }

    /// Help text: name, usage lines and options.
    pub fn usage_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "NAME:\n   {} - {}\n", self.name, self.description);
        if !self.short_name.is_empty() {
            let _ = writeln!(out, "ALIAS:\n   {}\n", self.short_name);
        }
        out.push_str("USAGE:\n");
        for line in &self.usage {
            let _ = writeln!(out, "   {}", line);
        }
        if !self.flags.is_empty() {
            out.push_str("\nOPTIONS:\n");
            let width = self
                .flags
                .iter()
                .map(|f| f.display_name().len())
                .max()
                .unwrap_or(0);
            for flag in &self.flags {
                let _ = writeln!(
                    out,
                    "   {:<width$}   {}",
                    flag.display_name(),
                    flag.usage,
                    width = width
                );
            }
        }
        out.trim_end().to_string()
    }

    /// Incorrect-usage error carrying `message` followed by the help text.
    pub fn usage_error(&self, message: &str) -> ApiError {
        ApiError::IncorrectUsage(format!("{}\n\n{}", message, self.usage_text()))
    }
}

/// Collaborators injected into every command when the registry is built.
#[derive(Clone)]
pub struct CommandDependencies {
    pub config: Arc<CfConfig>,
    pub repo_locator: RepositoryLocator,
}

pub trait Command {
    fn metadata(&self) -> CommandMetadata;

    /// Requirements for this invocation, in evaluation order. Arity problems are
    /// reported here as `ApiError::IncorrectUsage` so nothing is evaluated.
    fn requirements(
        &mut self,
        factory: &dyn RequirementsFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Arc<dyn Requirement>>, ApiError>;

    fn execute(&mut self, flags: &FlagContext, ui: &mut dyn Ui) -> Result<(), ApiError>;
}

/// True when `err` is an HTTP error whose (status, platform code) pair is listed in
/// `remaps`, i.e. a failure the calling command treats as success.
pub fn is_remapped_success(err: &ApiError, remaps: &[(u16, &str)]) -> bool {
    err.http_error().map_or(false, |http| {
        remaps
            .iter()
            .any(|(status, code)| http.status == *status && http.error_code == *code)
    })
}

/// Error for a command whose typed requirement was read before `requirements` ran.
pub(crate) fn requirements_not_evaluated(command: &str) -> ApiError {
    ApiError::RequirementsNotEvaluated(command.to_string())
}

/// Parse an optional port flag; 0 means unset.
pub(crate) fn port_flag(flags: &FlagContext, metadata: &CommandMetadata) -> Result<u16, ApiError> {
    u16::try_from(flags.int("port"))
        .map_err(|_| metadata.usage_error("Port must be between 0 and 65535"))
}
