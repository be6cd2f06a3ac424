//! Port traits. API boundaries for the hexagon.
//!
//! - Outbound: called by the gateways into infrastructure
//! - Query: backend-neutral read/write descriptions passed through the query port

pub mod outbound;
pub mod query;

pub use outbound::{MediaSourcePort, QueryPort, StoragePort};
pub use query::{Filter, Order, SelectQuery, value_literal};
