//! Run configuration.
//!
//! Options are parsed once by [`Cli`] and resolved into a [`MigrationConfig`],
//! which is passed explicitly to the controller.

mod cli;

pub use cli::Cli;

use share_migrate_repository::MySqlConnectionConfig;

/// Default number of shares migrated concurrently.
pub const DEFAULT_MAX_CONCURRENCY: usize = 20;

/// Progress is logged every this many completed shares.
pub const PROGRESS_REPORT_INTERVAL: usize = 100;

/// The source is read once, sequentially.
pub const SOURCE_MAX_CONNECTIONS: u32 = 1;

/// Resolved configuration for a single run.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub source: MySqlConnectionConfig,
    pub target: MySqlConnectionConfig,
    /// Only migrate shares owned by this user. `None` migrates every share.
    pub owner: Option<String>,
    pub dry_run: bool,
    pub debug: bool,
    pub max_concurrency: usize,
    /// Exit non-zero when any share failed to migrate.
    pub strict: bool,
}

impl From<Cli> for MigrationConfig {
    fn from(cli: Cli) -> Self {
        Self {
            source: MySqlConnectionConfig {
                host: cli.source_db_host,
                port: cli.source_db_port,
                username: cli.source_db_username,
                password: cli.source_db_password,
                database: cli.source_db_name,
            },
            target: MySqlConnectionConfig {
                host: cli.target_db_host,
                port: cli.target_db_port,
                username: cli.target_db_username,
                password: cli.target_db_password,
                database: cli.target_db_name,
            },
            owner: Some(cli.user).filter(|user| !user.is_empty()),
            dry_run: cli.dry_run,
            debug: cli.debug,
            max_concurrency: cli.concurrency as usize,
            strict: cli.strict,
        }
    }
}

impl MigrationConfig {
    /// Pool size for the target: one connection per in-flight share.
    pub fn target_max_connections(&self) -> u32 {
        u32::try_from(self.max_concurrency).unwrap_or(u32::MAX)
    }
}
