use super::{Command, CommandDependencies, CommandMetadata, FlagContext, FlagKind, FlagSpec};
use crate::api::CurlRepository;
use crate::error::ApiError;
use crate::requirements::{Requirement, RequirementsFactory};
use crate::terminal::Ui;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub struct Curl {
    repo: Arc<dyn CurlRepository>,
}

impl Curl {
    pub fn new(deps: &CommandDependencies) -> Self {
        Self {
            repo: deps.repo_locator.curl_repository(),
        }
    }
}

/// Body text for display: responses declaring `application/json` are re-indented when
/// the body parses, anything else is returned unchanged.
pub fn format_curl_body(headers: &str, body: &str) -> String {
    if !headers.to_ascii_lowercase().contains("application/json") {
        return body.to_string();
    }
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"   ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    if value.serialize(&mut serializer).is_err() {
        return body.to_string();
    }
    String::from_utf8(out).unwrap_or_else(|_| body.to_string())
}

/// `@path` reads the body from a file; anything else is the body itself.
fn body_from_flag(value: &str) -> Result<String, ApiError> {
    match value.strip_prefix('@') {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => Ok(value.to_string()),
    }
}

impl Command for Curl {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "curl",
            short_name: "",
            description: "Executes a request to the targeted API endpoint",
            usage: vec![
                "cfctl curl PATH [-i] [-X METHOD] [-H HEADER]... [-d DATA] [--output FILE]",
                "",
                "   By default 'cfctl curl' will perform a GET to the specified PATH. If data",
                "   is provided via -d, a POST will be performed instead, and the Content-Type",
                "   will be set to application/json. You may override headers with -H and the",
                "   request method with -X.",
                "",
                "EXAMPLES:",
                "   cfctl curl \"/v2/apps\" -X GET -H \"Content-Type: application/x-www-form-urlencoded\" -d 'q=name:myapp'",
                "   cfctl curl \"/v2/apps\" -d @/path/to/file",
            ],
            flags: vec![
                FlagSpec::new("i", FlagKind::Bool, "Include response headers in the output"),
                FlagSpec::new("X", FlagKind::String, "HTTP method (GET,POST,PUT,DELETE,etc)"),
                FlagSpec::new(
                    "H",
                    FlagKind::StringSlice,
                    "Custom headers to include in the request, flag can be specified multiple times",
                ),
                FlagSpec::new(
                    "d",
                    FlagKind::String,
                    "HTTP data to include in the request body, or '@' followed by a file name to read the data from",
                ),
                FlagSpec::new(
                    "output",
                    FlagKind::String,
                    "Write curl body to FILE instead of stdout",
                ),
            ],
        }
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementsFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Arc<dyn Requirement>>, ApiError> {
        if flags.args().len() != 1 {
            return Err(self.metadata().usage_error("Requires PATH as argument"));
        }
        Ok(vec![factory.new_login_requirement()])
    }

    fn execute(&mut self, flags: &FlagContext, ui: &mut dyn Ui) -> Result<(), ApiError> {
        let path = flags.arg(0).unwrap_or_default();
        let body = if flags.is_set("d") {
            body_from_flag(&flags.string("d"))?
        } else {
            String::new()
        };
        let method = if flags.is_set("X") {
            flags.string("X")
        } else if flags.is_set("d") {
            "POST".to_string()
        } else {
            String::new()
        };
        let headers = flags.string_slice("H").join("\n");

        debug!(path = %path, method = %method, "Executing curl command");
        let response = self.repo.request(&method, path, &headers, &body)?;

        if flags.bool("i") {
            ui.say(response.headers.trim_end_matches('\n'));
        }

        let output = flags.string("output");
        if output.is_empty() {
            ui.say(&format_curl_body(&response.headers, &response.body));
        } else {
            std::fs::write(Path::new(&output), response.body.as_bytes())?;
            ui.ok();
        }
        Ok(())
    }
}
