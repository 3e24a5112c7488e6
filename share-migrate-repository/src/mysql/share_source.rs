// Schema 8 share reads
use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;

use crate::errors::ShareRepositoryError;
use crate::interfaces::ShareSource;
use crate::models::ShareV8;

// Integer columns go through CAST(... AS SIGNED) so that unsigned and small
// integer definitions all decode as i64. `permissions` is an integer column
// in most installations but is carried as text. Legacy rows store "never
// expires" as a zero DATETIME, which cannot decode, so it is read as NULL.
macro_rules! select_shares {
    () => {
        "SELECT CAST(id AS SIGNED) AS id, \
                CAST(share_type AS SIGNED) AS share_type, \
                share_with, \
                uid_owner, \
                CAST(parent AS SIGNED) AS parent, \
                item_type, \
                item_source, \
                item_target, \
                CAST(file_source AS SIGNED) AS file_source, \
                file_target, \
                CAST(permissions AS CHAR) AS permissions, \
                CAST(stime AS SIGNED) AS stime, \
                CAST(accepted AS SIGNED) AS accepted, \
                NULLIF(expiration, '0000-00-00 00:00:00') AS expiration, \
                token, \
                CAST(mail_send AS SIGNED) AS mail_send \
         FROM oc_share"
    };
}

const SELECT_ALL_SHARES: &str = concat!(select_shares!(), " ORDER BY id");
const SELECT_OWNER_SHARES: &str = concat!(select_shares!(), " WHERE uid_owner = ? ORDER BY id");

/// Reads schema 8 shares from MySQL.
pub struct MySqlShareSource {
    pool: MySqlPool,
}

impl MySqlShareSource {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareSource for MySqlShareSource {
    async fn fetch_all(&self, owner: Option<&str>) -> Result<Vec<ShareV8>, ShareRepositoryError> {
        let shares = match owner.filter(|owner| !owner.is_empty()) {
            Some(owner) => {
                debug!(owner, "Reading shares for a single owner");
                sqlx::query_as::<_, ShareV8>(SELECT_OWNER_SHARES)
                    .bind(owner)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                debug!("Reading all shares");
                sqlx::query_as::<_, ShareV8>(SELECT_ALL_SHARES)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(ShareRepositoryError::Query)?;

        Ok(shares)
    }
}
