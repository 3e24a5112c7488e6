//! # Share Migrate
//!
//! Copies share records from an `oc_share` table in schema version 8 into an
//! `oc_share` table in schema version 9, filling in the `uid_initiator`
//! column the newer schema adds.
//!
//! ## Modules
//!
//! - [`config`]: Command line options and the resolved run configuration
//! - [`migration`]: Bounded-concurrency migration engine
//! - [`controller`]: Wires the MySQL gateways to the engine and maps outcomes to exit codes
//! - [`errors`]: Fatal error types for a run

pub mod config;
pub mod controller;
pub mod errors;
pub mod migration;

pub use config::{Cli, MigrationConfig};
pub use controller::run;
pub use errors::MigrationError;
pub use migration::{MigrationExecutor, MigrationReport};
