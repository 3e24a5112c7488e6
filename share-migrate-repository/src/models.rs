// Share records for the oc_share table in schema versions 8 and 9
use chrono::NaiveDateTime;

/// A row of `oc_share` as stored by schema version 8.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShareV8 {
    pub id: i64,
    pub share_type: i64,
    pub share_with: Option<String>,
    pub uid_owner: String,
    pub parent: Option<i64>,
    pub item_type: Option<String>,
    pub item_source: Option<String>,
    pub item_target: Option<String>,
    pub file_source: Option<i64>,
    pub file_target: Option<String>,
    pub permissions: String,
    pub stime: i64,
    pub accepted: i64,
    /// `None` when the share never expires.
    pub expiration: Option<NaiveDateTime>,
    pub token: Option<String>,
    pub mail_send: i64,
}

/// A row of `oc_share` as stored by schema version 9.
///
/// Version 9 records who initiated a share separately from who owns the
/// shared item. Version 8 has no such column, so a migrated share always has
/// `uid_initiator == share.uid_owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareV9 {
    pub share: ShareV8,
    pub uid_initiator: String,
}

impl From<ShareV8> for ShareV9 {
    fn from(share: ShareV8) -> Self {
        let uid_initiator = share.uid_owner.clone();
        Self {
            share,
            uid_initiator,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ShareV8;
    use chrono::NaiveDate;

    /// Builds a link share owned by `owner`.
    pub fn share(id: i64, owner: &str) -> ShareV8 {
        ShareV8 {
            id,
            share_type: 3,
            share_with: None,
            uid_owner: owner.to_string(),
            parent: None,
            item_type: Some("file".to_string()),
            item_source: Some(format!("{}", 1000 + id)),
            item_target: Some(format!("/{}", 1000 + id)),
            file_source: Some(1000 + id),
            file_target: Some(format!("/report-{}.pdf", id)),
            permissions: "1".to_string(),
            stime: 1_500_000_000 + id,
            accepted: 0,
            expiration: NaiveDate::from_ymd_opt(2030, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
            token: Some(format!("tok{}", id)),
            mail_send: 0,
        }
    }
}
