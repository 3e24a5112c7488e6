use thiserror::Error;

/// Represents errors that can occur within the share repository.
///
/// Connection and query errors are fatal for a migration run. Write and
/// validation errors concern a single share.
#[derive(Debug, Error)]
pub enum ShareRepositoryError {
    #[error("Cannot connect to {descriptor}: {source}")]
    Connection {
        descriptor: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Cannot get all shares because {0}")]
    Query(#[source] sqlx::Error),

    #[error("Cannot insert share {id}: {source}")]
    Write {
        id: i64,
        #[source]
        source: sqlx::Error,
    },

    #[error("Invalid share {id}: {reason}")]
    InvalidShare { id: i64, reason: String },
}
