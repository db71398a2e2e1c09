//! midex CLI - Main entry point

use clap::Parser;
use midex_cli::{Cli, Commands, ExportCommand};
use midex_common::logging::{init_logging, LogConfig, LogLevel};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env().unwrap_or_default();
    if cli.verbose {
        // --verbose wins over MIDEX_LOG_LEVEL
        log_config = log_config.with_level(LogLevel::Debug);
    }
    let _ = init_logging(&log_config);

    if let Err(e) = execute_command(cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::ImexUpdate {
            input,
            output,
            reports_dir,
            dry_run,
        } => midex_cli::commands::imex_update::run(input, output, reports_dir, dry_run).await,

        Commands::Export { command } => match command {
            ExportCommand::Xml {
                input,
                out,
                psi_version,
                gzip,
            } => midex_cli::commands::export::xml(input, out, psi_version, gzip).await,

            ExportCommand::Mitab {
                input,
                out,
                gzip,
                no_header,
            } => midex_cli::commands::export::mitab(input, out, gzip, no_header).await,

            ExportCommand::Uniprot { input, out_dir } => {
                midex_cli::commands::export::uniprot(input, out_dir).await
            },
        },

        Commands::ValidateMitab { input, limit } => {
            midex_cli::commands::validate_mitab::run(input, limit).await
        },

        Commands::CvCache {
            mapping,
            out,
            builtins,
        } => midex_cli::commands::cv_cache::run(mapping, out, builtins).await,
    }
}
