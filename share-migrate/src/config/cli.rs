use clap::Parser;
use share_migrate_repository::mysql::connection::DEFAULT_MYSQL_PORT;

use super::DEFAULT_MAX_CONCURRENCY;

/// Migrate oc_share rows from schema version 8 to schema version 9.
///
/// Every option can also be set through the environment variable shown in
/// `--help`; a `.env` file in the working directory is loaded first.
#[derive(Debug, Parser)]
#[command(name = "share-migrate", version)]
pub struct Cli {
    /// The username to connect to the source db
    #[arg(long = "sourcedbusername", env = "SOURCE_DB_USERNAME", default_value = "")]
    pub source_db_username: String,

    /// The pass to connect to the source db
    #[arg(
        long = "sourcedbpass",
        env = "SOURCE_DB_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub source_db_password: String,

    /// The host of the source db
    #[arg(long = "sourcedbhost", env = "SOURCE_DB_HOST", default_value = "127.0.0.1")]
    pub source_db_host: String,

    /// The port of the source db
    #[arg(long = "sourcedbport", env = "SOURCE_DB_PORT", default_value_t = DEFAULT_MYSQL_PORT)]
    pub source_db_port: u16,

    /// The name of the source db
    #[arg(long = "sourcedbname", env = "SOURCE_DB_NAME", default_value = "")]
    pub source_db_name: String,

    /// The username to connect to the target db
    #[arg(long = "targetdbusername", env = "TARGET_DB_USERNAME", default_value = "")]
    pub target_db_username: String,

    /// The pass to connect to the target db
    #[arg(
        long = "targetdbpass",
        env = "TARGET_DB_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub target_db_password: String,

    /// The host of the target db
    #[arg(long = "targetdbhost", env = "TARGET_DB_HOST", default_value = "127.0.0.1")]
    pub target_db_host: String,

    /// The port of the target db
    #[arg(long = "targetdbport", env = "TARGET_DB_PORT", default_value_t = DEFAULT_MYSQL_PORT)]
    pub target_db_port: u16,

    /// The name of the target db
    #[arg(long = "targetdbname", env = "TARGET_DB_NAME", default_value = "")]
    pub target_db_name: String,

    /// Limit the migration to this user's shares
    #[arg(long, env = "MIGRATION_USER", default_value = "")]
    pub user: String,

    /// Execute logic without committing changes to the databases
    #[arg(long = "dryrun", env = "MIGRATION_DRY_RUN")]
    pub dry_run: bool,

    /// Shows debugging info
    #[arg(long, env = "MIGRATION_DEBUG")]
    pub debug: bool,

    /// Maximum number of shares migrated at the same time
    #[arg(
        long,
        env = "MIGRATION_CONCURRENCY",
        default_value_t = DEFAULT_MAX_CONCURRENCY as u32,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub concurrency: u32,

    /// Exit with status 2 when any share failed to migrate
    #[arg(long, env = "MIGRATION_STRICT")]
    pub strict: bool,
}
