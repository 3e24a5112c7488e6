use crate::errors::ShareRepositoryError;
use crate::models::ShareV9;

/// Write side of a migration: the schema 9 store.
///
/// `write_share` is called concurrently from many tasks, so implementors must
/// be safe to share across them.
#[async_trait::async_trait]
pub trait ShareSink: Send + Sync {
    /// Persists one share as a new row.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The share was written, or validated only when the sink runs dry
    /// * `Err(ShareRepositoryError)` - The share was rejected or the insert failed
    async fn write_share(&self, share: &ShareV9) -> Result<(), ShareRepositoryError>;

    /// Whether writes are validated but never persisted.
    fn is_dry_run(&self) -> bool {
        false
    }
}
