//! Error types for a migration run.

use share_migrate_repository::ShareRepositoryError;
use thiserror::Error;

/// Errors that abort a migration run.
///
/// Failures of individual share writes are not represented here; they are
/// logged by the engine and counted in the run's report.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// A source or target database could not be reached.
    #[error("Connection error: {0}")]
    Connection(#[source] ShareRepositoryError),

    /// Reading shares from the source failed.
    #[error("Query error: {0}")]
    Query(#[source] ShareRepositoryError),

    /// The source returned no shares at all.
    #[error("oc_share table does not contain any shares{}", owner_scope(.owner))]
    EmptySource { owner: Option<String> },

    /// The admission semaphore was closed while shares were being scheduled.
    #[error("Scheduler error: concurrency limiter closed")]
    Scheduler,
}

fn owner_scope(owner: &Option<String>) -> String {
    match owner {
        Some(owner) => format!(" owned by {}", owner),
        None => String::new(),
    }
}

impl MigrationError {
    /// Create an empty source error for the given owner filter.
    pub fn empty_source(owner: Option<&str>) -> Self {
        Self::EmptySource {
            owner: owner.map(str::to_string),
        }
    }
}
