//! TDP CLI - Main entry point

use clap::Parser;
use std::process;
use tdp_cli::{Cli, Commands};
use tdp_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use tracing::error;

fn main() {
    let cli = Cli::parse();

    // Errors are reported to both the console and the rolling log file.
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Both)
        .log_file_prefix("tdp")
        .build();

    // Environment variables take precedence over the defaults above.
    let log_config = match log_config.with_env_overrides() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid logging configuration: {e}");
            process::exit(2);
        }
    };

    // The guard flushes buffered log lines when main returns.
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    if let Err(e) = execute_command(&cli) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<()> {
    let paths = cli.config_paths();

    match cli.command {
        Commands::Run => tdp_cli::commands::run::run(&paths),
        Commands::Ingest => tdp_cli::commands::ingest::run(&paths),
        Commands::Validate => tdp_cli::commands::validate::run(&paths),
        Commands::Transform => tdp_cli::commands::transform::run(&paths),
        Commands::Status => tdp_cli::commands::status::run(&paths),
    }
}
