//! In-process backend. Implements QueryPort and StoragePort over JSON rows
//! held in memory.
//!
//! Used for offline wiring when no backend is configured, and as the fake
//! backend in gateway tests. `set_offline(true)` makes every call fail the
//! way an unreachable backend would.

use crate::domain::DomainError;
use crate::ports::{Filter, QueryPort, SelectQuery, StoragePort, value_literal};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
struct StoreData {
    tables: HashMap<String, Vec<Value>>,
    objects: HashMap<String, Vec<u8>>,
    /// Last assigned `created_at`; new rows always get a strictly later one.
    last_created_at: Option<DateTime<Utc>>,
}

/// In-memory table store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: Mutex<StoreData>,
    offline: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable backend.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, AtomicOrdering::SeqCst);
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(AtomicOrdering::SeqCst)
    }

    /// Put rows into `table` as given (ids are assigned only when missing).
    /// Works while offline.
    pub async fn seed(&self, table: &str, rows: impl IntoIterator<Item = Value>) {
        let mut data = self.data.lock().await;
        let stored = data.tables.entry(table.to_string()).or_default();
        for mut row in rows {
            if let Value::Object(fields) = &mut row {
                ensure_id(fields);
            }
            stored.push(row);
        }
    }

    /// Snapshot of every row in `table`, in insertion order.
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.data
            .lock()
            .await
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Bytes stored under `bucket`/`key`, if any.
    pub async fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.data
            .lock()
            .await
            .objects
            .get(&object_path(bucket, key))
            .cloned()
    }

    fn check_online(&self, operation: &str, target: &str) -> Result<(), DomainError> {
        if self.is_offline() {
            return Err(DomainError::Backend(format!(
                "{} {}: backend unreachable",
                target, operation
            )));
        }
        Ok(())
    }
}

fn object_path(bucket: &str, key: &str) -> String {
    format!("{}/{}", bucket, key)
}

fn ensure_id(fields: &mut Map<String, Value>) {
    if fields.get("id").is_none_or(Value::is_null) {
        fields.insert(
            "id".to_string(),
            Value::String(uuid::Uuid::new_v4().to_string()),
        );
    }
}

fn is_null(value: Option<&Value>) -> bool {
    value.is_none_or(Value::is_null)
}

fn matches(row: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq { column, value } if value.is_null() => is_null(row.get(column)),
        Filter::Eq { column, value } => row
            .get(column)
            .is_some_and(|stored| value_literal(stored) == value_literal(value)),
        Filter::IsNull { column } => is_null(row.get(column)),
    }
}

fn matches_all(row: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| matches(row, filter))
}

/// Column ordering as Postgres sorts it: nulls after every value, timestamps
/// chronologically, numbers numerically.
fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (is_null(a), is_null(b)) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => {
            match (
                DateTime::parse_from_rfc3339(x),
                DateTime::parse_from_rfc3339(y),
            ) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => value_literal(x).cmp(&value_literal(y)),
        _ => Ordering::Equal,
    }
}

fn project(row: &Value, columns: &[String]) -> Value {
    if columns.is_empty() {
        return row.clone();
    }
    let projected = columns
        .iter()
        .map(|column| {
            let value = row.get(column).cloned().unwrap_or(Value::Null);
            (column.clone(), value)
        })
        .collect::<Map<String, Value>>();
    Value::Object(projected)
}

#[async_trait::async_trait]
impl QueryPort for InMemoryStore {
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, DomainError> {
        self.check_online("select", table)?;
        let data = self.data.lock().await;

        let mut rows: Vec<&Value> = data
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_all(row, &query.filters))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows
            .into_iter()
            .map(|row| project(row, &query.columns))
            .collect())
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, DomainError> {
        self.check_online("insert", table)?;
        let Value::Object(mut fields) = row else {
            return Err(DomainError::Backend(format!(
                "{} insert: row must be a JSON object",
                table
            )));
        };

        let mut data = self.data.lock().await;
        ensure_id(&mut fields);
        if fields.get("created_at").is_none_or(Value::is_null) {
            let mut created_at = Utc::now();
            if let Some(last) = data.last_created_at {
                if created_at <= last {
                    created_at = last + Duration::microseconds(1);
                }
            }
            data.last_created_at = Some(created_at);
            fields.insert(
                "created_at".to_string(),
                Value::String(created_at.to_rfc3339_opts(SecondsFormat::Micros, false)),
            );
        }

        let stored = Value::Object(fields);
        data.tables
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());
        debug!(table, "inserted row");
        Ok(stored)
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Value,
    ) -> Result<Vec<Value>, DomainError> {
        self.check_online("update", table)?;
        let Value::Object(patch) = patch else {
            return Err(DomainError::Backend(format!(
                "{} update: patch must be a JSON object",
                table
            )));
        };

        let mut data = self.data.lock().await;
        let Some(rows) = data.tables.get_mut(table) else {
            return Ok(Vec::new());
        };

        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|row| matches_all(row, filters)) {
            if let Value::Object(fields) = row {
                for (column, value) in &patch {
                    fields.insert(column.clone(), value.clone());
                }
            }
            updated.push(row.clone());
        }
        Ok(updated)
    }
}

#[async_trait::async_trait]
impl StoragePort for InMemoryStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), DomainError> {
        if self.is_offline() {
            return Err(DomainError::Storage(format!(
                "{}: backend unreachable",
                object_path(bucket, key)
            )));
        }
        self.data
            .lock()
            .await
            .objects
            .insert(object_path(bucket, key), bytes);
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("memory://{}", object_path(bucket, key))
    }
}
