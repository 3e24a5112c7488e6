//! Run controller: connects both databases, runs the migration once and
//! decides the process exit status.

use std::sync::Arc;

use share_migrate_repository::mysql::{self, MySqlShareSink, MySqlShareSource};
use tracing::info;

use crate::config::{MigrationConfig, SOURCE_MAX_CONNECTIONS};
use crate::errors::MigrationError;
use crate::migration::{MigrationExecutor, MigrationReport};

/// The run finished; individual share failures may have been logged.
pub const EXIT_SUCCESS: u8 = 0;
/// A connection failed, the read failed or the source was empty.
pub const EXIT_FATAL: u8 = 1;
/// Strict mode only: the run finished but some shares failed.
pub const EXIT_PARTIAL_FAILURE: u8 = 2;

/// Connect to both databases and migrate every matching share.
///
/// Both connections are established before any share is read, so a bad
/// target fails the run without touching the source table.
pub async fn run(config: &MigrationConfig) -> Result<MigrationReport, MigrationError> {
    info!("Connecting to source database {}", config.source.descriptor());
    let source_pool = mysql::connect(&config.source, SOURCE_MAX_CONNECTIONS)
        .await
        .map_err(MigrationError::Connection)?;
    info!("✓ Connected to source database");

    info!("Connecting to target database {}", config.target.descriptor());
    let target_pool = mysql::connect(&config.target, config.target_max_connections())
        .await
        .map_err(MigrationError::Connection)?;
    info!("✓ Connected to target database");

    let source = Arc::new(MySqlShareSource::new(source_pool));
    let sink = Arc::new(MySqlShareSink::new(target_pool, config.dry_run));

    let executor =
        MigrationExecutor::new(source, sink).with_max_concurrency(config.max_concurrency);
    executor.execute(config.owner.as_deref()).await
}

/// Exit status for a run that completed.
///
/// Share failures only change the status in strict mode.
pub fn exit_status(report: &MigrationReport, strict: bool) -> u8 {
    if strict && report.has_failures() {
        EXIT_PARTIAL_FAILURE
    } else {
        EXIT_SUCCESS
    }
}
