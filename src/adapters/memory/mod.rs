//! In-process adapter. Stands in for the hosted backend offline and in tests.

pub mod store;

pub use store::InMemoryStore;
