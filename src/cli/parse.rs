//! CLI parse: clap types for cfctl. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cfctl - command-line client for a Cloud Foundry style control plane
#[derive(Parser)]
#[command(name = "cfctl")]
#[command(about = "Command-line client for a Cloud Foundry style control-plane API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bind a service instance to an HTTP route
    #[command(name = "bind-route-service", visible_alias = "brs")]
    BindRouteService {
        /// DOMAIN SERVICE_INSTANCE
        #[arg(value_name = "ARGS")]
        args: Vec<String>,
        /// Hostname used in combination with DOMAIN to specify the route to bind
        #[arg(long, short = 'n')]
        hostname: Option<String>,
        /// Path used in combination with HOSTNAME and DOMAIN to specify the route to bind
        #[arg(long)]
        path: Option<String>,
        /// Port used in combination with DOMAIN to specify a TCP route to bind
        #[arg(long)]
        port: Option<i64>,
        /// Valid JSON object containing service-specific configuration parameters, inline or in a file
        #[arg(short = 'c', value_name = "PARAMETERS_AS_JSON")]
        parameters: Option<String>,
        /// Force binding without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Unbind a service instance from an HTTP route
    #[command(name = "unbind-route-service", visible_alias = "urs")]
    UnbindRouteService {
        /// DOMAIN SERVICE_INSTANCE
        #[arg(value_name = "ARGS")]
        args: Vec<String>,
        #[arg(long, short = 'n')]
        hostname: Option<String>,
        #[arg(long)]
        path: Option<String>,
        #[arg(long)]
        port: Option<i64>,
        /// Force unbinding without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// List service brokers
    #[command(name = "service-brokers")]
    ServiceBrokers {
        #[arg(value_name = "ARGS")]
        args: Vec<String>,
    },
    /// Executes a request to the targeted API endpoint
    Curl {
        /// PATH
        #[arg(value_name = "ARGS")]
        args: Vec<String>,
        /// Include response headers in the output
        #[arg(short = 'i')]
        include: bool,
        /// HTTP method (GET,POST,PUT,DELETE,etc)
        #[arg(short = 'X')]
        method: Option<String>,
        /// Custom headers to include in the request, flag can be specified multiple times
        #[arg(short = 'H')]
        headers: Vec<String>,
        /// HTTP data to include in the request body, or '@' followed by a file name
        #[arg(short = 'd', allow_hyphen_values = true)]
        data: Option<String>,
        /// Write curl body to FILE instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// Reports whether SSH is enabled on an application container instance
    #[command(name = "ssh-enabled")]
    SshEnabled {
        /// APP_NAME
        #[arg(value_name = "ARGS")]
        args: Vec<String>,
    },
}
