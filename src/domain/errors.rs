//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Transport failure or query rejected by the backend.
    #[error("Backend error: {0}")]
    Backend(String),

    /// A row did not have the shape the mapper expects.
    #[error("Row decode failed: {0}")]
    Decode(String),

    #[error("No row in {table} with id {id}")]
    NotFound { table: String, id: String },

    /// Conditional counter update kept losing against concurrent writers.
    #[error("Counter {column} on {table}/{id} still contended after {attempts} attempts")]
    Contention {
        table: String,
        id: String,
        column: String,
        attempts: u32,
    },

    #[error("Persisting post failed: {0}")]
    Persistence(String),

    #[error("Object storage error: {0}")]
    Storage(String),

    #[error("Reading media failed: {0}")]
    Media(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
