//! cfctl CLI Binary
//!
//! Command-line interface for a Cloud Foundry style control-plane API.

use cfctl::cli::{exit_code, map_error, Cli, RunContext};
use cfctl::config::ConfigLoader;
use cfctl::logging::{init_logging, LoggingConfig};
use cfctl::terminal::{TerminalUi, Ui};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("cfctl starting");

    let mut ui = TerminalUi::new();
    let mut context = match RunContext::new(cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            ui.failed(&map_error(&e));
            process::exit(1);
        }
    };

    let result = context.execute(&cli.command, &mut ui);
    if let Err(ref e) = result {
        error!("Command failed: {}", e);
    }
    process::exit(exit_code(&result));
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = ConfigLoader::load_with_override(cli.config.as_deref())
        .map(|c| c.logging)
        .unwrap_or_default();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_build_logging_config_default() {
        let file = config_file("");
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["cfctl", "--config", &path, "service-brokers"]).unwrap();
        let config = build_logging_config(&cli);
        assert!(config.enabled);
        assert_eq!(config.output, "stderr");
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn test_build_logging_config_quiet() {
        let cli = Cli::try_parse_from(["cfctl", "--quiet", "service-brokers"]).unwrap();
        let config = build_logging_config(&cli);
        assert!(!config.enabled, "quiet should disable logging");
    }

    #[test]
    fn test_build_logging_config_verbose_and_explicit_level() {
        let cli = Cli::try_parse_from(["cfctl", "--verbose", "service-brokers"]).unwrap();
        assert_eq!(build_logging_config(&cli).level, "debug");

        let cli = Cli::try_parse_from([
            "cfctl",
            "--verbose",
            "--log-level",
            "trace",
            "service-brokers",
        ])
        .unwrap();
        assert_eq!(build_logging_config(&cli).level, "trace");
    }

    #[test]
    fn test_build_logging_config_reads_file_section() {
        let file = config_file("[logging]\nlevel = \"info\"\nformat = \"json\"\n");
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["cfctl", "--config", &path, "service-brokers"]).unwrap();
        let config = build_logging_config(&cli);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "json");
    }
}
