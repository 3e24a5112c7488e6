use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use share_migrate::controller::{exit_status, EXIT_FATAL};
use share_migrate::{run, Cli, MigrationConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging. Logs go to stderr; stdout only carries the
/// final summary line.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "share_migrate={level},share_migrate_repository={level}",
            level = default_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv().ok();

    let config = MigrationConfig::from(Cli::parse());
    init_tracing(config.debug);

    info!(
        owner = config.owner.as_deref().unwrap_or("<all>"),
        dry_run = config.dry_run,
        max_concurrency = config.max_concurrency,
        "Starting oc_share migration from schema 8 to schema 9"
    );

    match run(&config).await {
        Ok(report) => {
            println!("{}", report);
            ExitCode::from(exit_status(&report, config.strict))
        }
        Err(e) => {
            error!(error = %e, "Migration aborted");
            ExitCode::from(EXIT_FATAL)
        }
    }
}
