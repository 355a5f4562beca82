//! CLI help and command-name contract for routing.

use crate::cli::parse::Commands;
use crate::commands::FlagContext;

/// Registry name of the parsed subcommand (e.g. "bind-route-service").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::BindRouteService { .. } => "bind-route-service",
        Commands::UnbindRouteService { .. } => "unbind-route-service",
        Commands::ServiceBrokers { .. } => "service-brokers",
        Commands::Curl { .. } => "curl",
        Commands::SshEnabled { .. } => "ssh-enabled",
    }
}

/// Convert a parsed subcommand into the registry name and its flag context.
pub fn invocation(command: &Commands) -> (&'static str, FlagContext) {
    let flags = match command {
        Commands::BindRouteService {
            args,
            hostname,
            path,
            port,
            parameters,
            force,
        } => FlagContext::new(args.clone())
            .with_optional_string("hostname", hostname.clone())
            .with_optional_string("path", path.clone())
            .with_optional_int("port", *port)
            .with_optional_string("c", parameters.clone())
            .with_bool("force", *force),
        Commands::UnbindRouteService {
            args,
            hostname,
            path,
            port,
            force,
        } => FlagContext::new(args.clone())
            .with_optional_string("hostname", hostname.clone())
            .with_optional_string("path", path.clone())
            .with_optional_int("port", *port)
            .with_bool("force", *force),
        Commands::ServiceBrokers { args } | Commands::SshEnabled { args } => {
            FlagContext::new(args.clone())
        }
        Commands::Curl {
            args,
            include,
            method,
            headers,
            data,
            output,
        } => FlagContext::new(args.clone())
            .with_bool("i", *include)
            .with_optional_string("X", method.clone())
            .with_strings("H", headers.iter().cloned())
            .with_optional_string("d", data.clone())
            .with_optional_string("output", output.clone()),
    };
    (command_name(command), flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parse::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_bind_route_service_invocation() {
        let command = parse(&[
            "cfctl",
            "bind-route-service",
            "example.com",
            "my-service",
            "-n",
            "app",
            "--path",
            "/v1",
            "-c",
            "{\"a\":1}",
            "-f",
        ]);
        let (name, flags) = invocation(&command);
        assert_eq!(name, "bind-route-service");
        assert_eq!(flags.args(), &["example.com".to_string(), "my-service".to_string()]);
        assert_eq!(flags.string("hostname"), "app");
        assert_eq!(flags.string("path"), "/v1");
        assert_eq!(flags.string("c"), "{\"a\":1}");
        assert!(flags.bool("force"));
        assert!(!flags.is_set("port"));
    }

    #[test]
    fn test_alias_parses() {
        let command = parse(&["cfctl", "brs", "example.com", "my-service"]);
        assert_eq!(command_name(&command), "bind-route-service");
    }

    #[test]
    fn test_curl_invocation_collects_headers() {
        let command = parse(&[
            "cfctl",
            "curl",
            "/v2/apps",
            "-X",
            "PUT",
            "-H",
            "content-type: application/json",
            "-H",
            "x-trace: 1",
            "-d",
            "{}",
            "-i",
        ]);
        let (name, flags) = invocation(&command);
        assert_eq!(name, "curl");
        assert_eq!(flags.arg(0), Some("/v2/apps"));
        assert_eq!(flags.string("X"), "PUT");
        assert_eq!(flags.string_slice("H").len(), 2);
        assert_eq!(flags.string("d"), "{}");
        assert!(flags.bool("i"));
        assert!(!flags.is_set("output"));
    }

    #[test]
    fn test_service_brokers_keeps_stray_args() {
        let (_, flags) = invocation(&parse(&["cfctl", "service-brokers", "blahblah"]));
        assert_eq!(flags.args(), &["blahblah".to_string()]);
    }
}
