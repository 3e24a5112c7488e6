//! Error types for the share repository.
//! Consolidates and re-exports error types related to share reads and writes.
mod share_repository;

pub use share_repository::ShareRepositoryError;
