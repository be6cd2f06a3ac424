//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters. Gateways receive them as `Arc<dyn ...>`.

use crate::domain::DomainError;
use crate::ports::query::{Filter, SelectQuery};
use serde_json::Value;

/// Relational backend reached over a generic query client.
///
/// Rows travel as JSON objects keyed by snake_case column names.
#[async_trait::async_trait]
pub trait QueryPort: Send + Sync {
    /// Read rows from `table` matching `query`.
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, DomainError>;

    /// Insert one row and return it as stored (with backend-assigned `id`
    /// and `created_at`).
    async fn insert(&self, table: &str, row: Value) -> Result<Value, DomainError>;

    /// Apply `patch` to every row matching all `filters`. Returns the updated
    /// rows; an empty vector means nothing matched.
    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Value,
    ) -> Result<Vec<Value>, DomainError>;
}

/// Binary object store (post images).
#[async_trait::async_trait]
pub trait StoragePort: Send + Sync {
    /// Store `bytes` under `key` in `bucket`.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DomainError>;

    /// Publicly reachable URL for an uploaded object. Does not check existence.
    fn public_url(&self, bucket: &str, key: &str) -> String;
}

/// Resolves an image reference picked by the user into bytes.
#[async_trait::async_trait]
pub trait MediaSourcePort: Send + Sync {
    async fn read(&self, uri: &str) -> Result<Vec<u8>, DomainError>;
}
