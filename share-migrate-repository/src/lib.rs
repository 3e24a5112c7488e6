//! # Share Migrate Repository
//! This crate provides the share record model for the `oc_share` table in
//! schema versions 8 and 9, traits for reading and writing share records, and
//! their MySQL implementations.
pub mod errors;
pub mod interfaces;
pub mod models;
pub mod mysql;

pub use errors::ShareRepositoryError;
pub use interfaces::{ShareSink, ShareSource};
pub use models::{ShareV8, ShareV9};
pub use mysql::{MySqlConnectionConfig, MySqlShareSink, MySqlShareSource};
