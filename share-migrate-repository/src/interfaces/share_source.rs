use crate::errors::ShareRepositoryError;
use crate::models::ShareV8;

/// Read side of a migration: the schema 8 store.
#[async_trait::async_trait]
pub trait ShareSource: Send + Sync {
    /// Returns every share, or only the shares owned by `owner`, ordered by
    /// ascending id.
    ///
    /// An empty result is not an error at this level.
    async fn fetch_all(&self, owner: Option<&str>) -> Result<Vec<ShareV8>, ShareRepositoryError>;
}
