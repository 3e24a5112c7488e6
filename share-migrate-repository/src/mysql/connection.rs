// MySQL connection setup
use std::fmt;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tracing::debug;

use crate::errors::ShareRepositoryError;

/// Default MySQL port.
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Location and credentials of one MySQL database.
#[derive(Clone, PartialEq, Eq)]
pub struct MySqlConnectionConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl MySqlConnectionConfig {
    /// Connection descriptor in `username:password@host:port/database` form,
    /// with the password masked so it can be logged.
    pub fn descriptor(&self) -> String {
        format!(
            "{}:***@{}:{}/{}",
            self.username, self.host, self.port, self.database
        )
    }

    /// Builds connect options field by field, so credentials never go
    /// through URL parsing and need no escaping.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username);
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        if !self.database.is_empty() {
            options = options.database(&self.database);
        }
        options
    }
}

impl fmt::Debug for MySqlConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// Connect to MySQL and return a connection pool.
///
/// The first connection is opened eagerly, so unreachable hosts and rejected
/// credentials fail here rather than on the first query.
pub async fn connect(
    config: &MySqlConnectionConfig,
    max_connections: u32,
) -> Result<MySqlPool, ShareRepositoryError> {
    debug!(
        descriptor = %config.descriptor(),
        max_connections,
        "Opening MySQL pool"
    );

    MySqlPoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(config.connect_options())
        .await
        .map_err(|source| ShareRepositoryError::Connection {
            descriptor: config.descriptor(),
            source,
        })
}
