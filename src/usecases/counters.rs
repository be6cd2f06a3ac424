//! Counter increments (`likes`, `comment_count`).
//!
//! Read the current value, then write value+1 guarded by the value read. A
//! guard miss means another writer got there first; re-read and try again.
//! Every lost round implies some other writer won, so `attempts >= N`
//! guarantees N concurrent increments all land.

use crate::domain::DomainError;
use crate::ports::{Filter, QueryPort, SelectQuery};
use serde_json::{Map, Value};
use tracing::debug;

/// Increment integer `column` of row `id` in `table`. Returns the new value.
///
/// A missing/null column counts as 0. Fails with `NotFound` when the row does
/// not exist and `Contention` when every attempt lost its race.
pub(crate) async fn increment_counter(
    query: &dyn QueryPort,
    table: &str,
    id: &str,
    column: &str,
    attempts: u32,
) -> Result<i64, DomainError> {
    let attempts = attempts.max(1);
    let read = SelectQuery::new().columns([column]).eq("id", id).limit(1);

    for attempt in 1..=attempts {
        let row = query
            .select(table, &read)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::NotFound {
                table: table.to_string(),
                id: id.to_string(),
            })?;

        let current = row.get(column).and_then(Value::as_i64);
        let next = current.unwrap_or(0) + 1;
        let guard = match current {
            Some(value) => Filter::eq(column, value),
            None => Filter::is_null(column),
        };

        let mut patch = Map::new();
        patch.insert(column.to_string(), Value::from(next));

        let updated = query
            .update(table, &[Filter::eq("id", id), guard], Value::Object(patch))
            .await?;
        if !updated.is_empty() {
            return Ok(next);
        }
        debug!(table, id, column, attempt, "counter moved underneath, retrying");
    }

    Err(DomainError::Contention {
        table: table.to_string(),
        id: id.to_string(),
        column: column.to_string(),
        attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_null_counter_starts_at_one() {
        let store = InMemoryStore::new();
        store.seed("posts", [json!({ "id": "p1" })]).await;

        let likes = increment_counter(&store, "posts", "p1", "likes", 3)
            .await
            .unwrap();
        assert_eq!(likes, 1);
        assert_eq!(store.rows("posts").await[0]["likes"], 1);
    }

    #[tokio::test]
    async fn test_missing_row_is_not_found() {
        let store = InMemoryStore::new();
        let err = increment_counter(&store, "posts", "nope", "likes", 3)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_exact() {
        let store = Arc::new(InMemoryStore::new());
        store
            .seed("course_exchanges", [json!({ "id": "ex-1", "likes": 3 })])
            .await;

        let tasks: Vec<_> = (0..12)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    increment_counter(&*store, "course_exchanges", "ex-1", "likes", 12).await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.rows("course_exchanges").await[0]["likes"], 15);
    }

    /// Store whose guarded updates never match, as if another writer always wins.
    struct AlwaysRaced(InMemoryStore);

    #[async_trait::async_trait]
    impl QueryPort for AlwaysRaced {
        async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, DomainError> {
            self.0.select(table, query).await
        }

        async fn insert(&self, table: &str, row: Value) -> Result<Value, DomainError> {
            self.0.insert(table, row).await
        }

        async fn update(
            &self,
            _table: &str,
            _filters: &[Filter],
            _patch: Value,
        ) -> Result<Vec<Value>, DomainError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_gives_up_after_attempts() {
        let store = AlwaysRaced(InMemoryStore::new());
        store.0.seed("posts", [json!({ "id": "p1", "likes": 0 })]).await;

        let err = increment_counter(&store, "posts", "p1", "likes", 3)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Contention { attempts: 3, .. }));
    }
}
