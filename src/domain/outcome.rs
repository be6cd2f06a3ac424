//! Operation outcomes that keep the "never fail" caller contract while still
//! telling the caller whether the data came from the backend.

use crate::domain::DomainError;
use serde::Serialize;

/// Result of a list read. Reads never fail; on backend failure they carry a
/// substitute list (placeholders or empty) plus the cause.
#[derive(Debug)]
pub enum Fetched<T> {
    Live(Vec<T>),
    Degraded { items: Vec<T>, cause: DomainError },
}

impl<T> Fetched<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Fetched::Live(items) => items,
            Fetched::Degraded { items, .. } => items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Fetched::Live(items) => items,
            Fetched::Degraded { items, .. } => items,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Fetched::Live(_))
    }

    pub fn cause(&self) -> Option<&DomainError> {
        match self {
            Fetched::Live(_) => None,
            Fetched::Degraded { cause, .. } => Some(cause),
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Result of a write that falls back to a locally fabricated record.
#[derive(Debug)]
pub enum Created<T> {
    Stored(T),
    /// Never reached the backend; `record` only exists client-side.
    Local { record: T, cause: DomainError },
}

impl<T> Created<T> {
    pub fn record(&self) -> &T {
        match self {
            Created::Stored(record) => record,
            Created::Local { record, .. } => record,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            Created::Stored(record) => record,
            Created::Local { record, .. } => record,
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, Created::Stored(_))
    }
}

/// Reply of the like operations on exchange and teaming requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeResult {
    pub success: bool,
}

impl LikeResult {
    pub const OK: LikeResult = LikeResult { success: true };
    pub const FAILED: LikeResult = LikeResult { success: false };
}
