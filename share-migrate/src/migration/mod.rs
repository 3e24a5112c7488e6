//! Migration engine: reads candidate shares once, then writes each one as an
//! independent task under a fixed concurrency limit.
mod executor;

pub use executor::{MigrationExecutor, MigrationReport};
