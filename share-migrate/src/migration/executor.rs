// Migration executor - orchestrates the migration flow
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use share_migrate_repository::{ShareSink, ShareSource, ShareV9};
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::{DEFAULT_MAX_CONCURRENCY, PROGRESS_REPORT_INTERVAL};
use crate::errors::MigrationError;

/// Outcome of a run that got past the initial read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Shares returned by the source.
    pub total: usize,
    /// Shares written to the target (or validated, in a dry run).
    pub migrated: usize,
    /// Shares whose write failed or whose task panicked.
    pub failed: usize,
    pub dry_run: bool,
    pub elapsed: Duration,
}

impl MigrationReport {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Success. Dry run: {}. Migrated {}/{} shares, {} failed, in {:.2}s",
            self.dry_run,
            self.migrated,
            self.total,
            self.failed,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Migration executor that coordinates the migration process
pub struct MigrationExecutor {
    source: Arc<dyn ShareSource>,
    sink: Arc<dyn ShareSink>,
    max_concurrency: usize,
}

impl MigrationExecutor {
    /// Create a new migration executor with the default concurrency limit.
    pub fn new(source: Arc<dyn ShareSource>, sink: Arc<dyn ShareSink>) -> Self {
        Self {
            source,
            sink,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Set how many shares may be in flight at once. Clamped to at least one.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Execute the full migration process.
    ///
    /// Fails only when the read fails or returns nothing. A failed write is
    /// logged and counted, and never stops the other shares; the call returns
    /// once every scheduled share has finished.
    pub async fn execute(&self, owner: Option<&str>) -> Result<MigrationReport, MigrationError> {
        let start_time = Instant::now();

        info!("=== Reading shares from source ===");
        let shares = self
            .source
            .fetch_all(owner)
            .await
            .map_err(MigrationError::Query)?;

        if shares.is_empty() {
            return Err(MigrationError::empty_source(owner));
        }
        info!("✓ Read {} shares", shares.len());

        info!(
            max_concurrency = self.max_concurrency,
            dry_run = self.sink.is_dry_run(),
            "=== Writing shares to target ==="
        );

        let total = shares.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let failed = Arc::new(AtomicUsize::new(0));
        let processed = Arc::new(AtomicUsize::new(0));
        let mut scheduler_error = None;

        let mut tasks = Vec::with_capacity(total);

        // Shares are admitted in fetch order: the loop waits for a free slot
        // before spawning the next one.
        for share in shares {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    scheduler_error = Some(MigrationError::Scheduler);
                    break;
                }
            };

            let sink = self.sink.clone();
            let failed = failed.clone();
            let processed = processed.clone();
            let share_id = share.id;

            let task = tokio::spawn(async move {
                let _permit = permit;

                let share = ShareV9::from(share);
                if let Err(e) = sink.write_share(&share).await {
                    warn!(share_id, error = %e, "Failed to migrate share");
                    failed.fetch_add(1, Ordering::Relaxed);
                }

                let current = processed.fetch_add(1, Ordering::Relaxed) + 1;
                if current % PROGRESS_REPORT_INTERVAL == 0 || current == total {
                    info!("  Progress: {}/{} shares", current, total);
                }
            });

            tasks.push((share_id, task));
        }

        // Wait for all tasks to complete
        for (share_id, task) in tasks {
            if let Err(e) = task.await {
                error!(share_id, error = %e, "Share migration task panicked");
                failed.fetch_add(1, Ordering::Relaxed);
            }
        }

        if let Some(e) = scheduler_error {
            return Err(e);
        }

        let failed = failed.load(Ordering::Relaxed);
        if failed > 0 {
            warn!("Failed to migrate {} of {} shares", failed, total);
        }

        let report = MigrationReport {
            total,
            migrated: total.saturating_sub(failed),
            failed,
            dry_run: self.sink.is_dry_run(),
            elapsed: start_time.elapsed(),
        };
        info!("=== Migration Complete ===");
        info!("Total time: {:.2}s", report.elapsed.as_secs_f64());

        Ok(report)
    }
}
