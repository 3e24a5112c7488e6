// Schema 9 share writes
use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;

use crate::errors::ShareRepositoryError;
use crate::interfaces::ShareSink;
use crate::models::ShareV9;

// The source id is not carried over: the target assigns its own.
const INSERT_SHARE: &str = "INSERT INTO oc_share (share_type, share_with, uid_owner, uid_initiator, \
     parent, item_type, item_source, item_target, file_source, file_target, permissions, \
     stime, accepted, expiration, token, mail_send) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// Writes schema 9 shares to MySQL.
///
/// The pool is shared by every concurrent `write_share` call. When `dry_run`
/// is set the insert is built and validated but never executed.
pub struct MySqlShareSink {
    pool: MySqlPool,
    dry_run: bool,
}

impl MySqlShareSink {
    pub fn new(pool: MySqlPool, dry_run: bool) -> Self {
        Self { pool, dry_run }
    }
}

/// Rejects shares the target schema cannot hold.
pub(crate) fn validate_share(share: &ShareV9) -> Result<(), ShareRepositoryError> {
    let id = share.share.id;
    if share.share.uid_owner.is_empty() {
        return Err(ShareRepositoryError::InvalidShare {
            id,
            reason: "uid_owner is empty".to_string(),
        });
    }
    if share.uid_initiator.is_empty() {
        return Err(ShareRepositoryError::InvalidShare {
            id,
            reason: "uid_initiator is empty".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl ShareSink for MySqlShareSink {
    async fn write_share(&self, share: &ShareV9) -> Result<(), ShareRepositoryError> {
        validate_share(share)?;

        let v8 = &share.share;
        let query = sqlx::query(INSERT_SHARE)
            .bind(v8.share_type)
            .bind(v8.share_with.as_deref())
            .bind(v8.uid_owner.as_str())
            .bind(share.uid_initiator.as_str())
            .bind(v8.parent)
            .bind(v8.item_type.as_deref())
            .bind(v8.item_source.as_deref())
            .bind(v8.item_target.as_deref())
            .bind(v8.file_source)
            .bind(v8.file_target.as_deref())
            .bind(v8.permissions.as_str())
            .bind(v8.stime)
            .bind(v8.accepted)
            .bind(v8.expiration)
            .bind(v8.token.as_deref())
            .bind(v8.mail_send);

        if self.dry_run {
            debug!(share_id = v8.id, share = ?share, "Dry run, insert not executed");
            return Ok(());
        }

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|source| ShareRepositoryError::Write { id: v8.id, source })?;

        debug!(
            share_id = v8.id,
            new_id = result.last_insert_id(),
            "Inserted share"
        );
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}
