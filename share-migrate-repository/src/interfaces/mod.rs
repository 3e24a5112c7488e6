//! This module defines and re-exports the interfaces for the share repository.
//! The migration engine only depends on these traits, never on a concrete backend.
mod share_sink;
mod share_source;

pub use share_sink::ShareSink;
pub use share_source::ShareSource;
