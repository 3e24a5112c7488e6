//! MySQL implementation of the share repository.
//!
//! Both gateways target the `oc_share` table. Every value that reaches the
//! backend is bound as a statement parameter.
pub mod connection;
pub mod share_sink;
pub mod share_source;

pub use connection::{connect, MySqlConnectionConfig};
pub use share_sink::MySqlShareSink;
pub use share_source::MySqlShareSource;
