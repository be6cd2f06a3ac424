//! Row mapper. Wire rows (snake_case columns) ⇄ domain entities.
//!
//! Row → entity conversions are total: missing counters become 0, missing
//! lists become empty, a missing or unparseable timestamp becomes the Unix
//! epoch, an unknown enum tag becomes the field's default. Only a scalar of
//! the wrong JSON type (e.g. a string counter) fails, at decode time.

pub mod exchange;
pub mod post;
pub mod teaming;

pub use exchange::{ExchangeCommentRow, ExchangeRow, NewExchangeCommentRow, NewExchangeRow};
pub use post::{NewPostRow, PostRow};
pub use teaming::{NewTeamingCommentRow, NewTeamingRow, TeamingCommentRow, TeamingRow};

use crate::domain::DomainError;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decode one JSON row into its wire struct.
pub fn decode_row<R: DeserializeOwned>(table: &str, row: Value) -> Result<R, DomainError> {
    serde_json::from_value(row).map_err(|e| DomainError::Decode(format!("{table}: {e}")))
}

pub fn decode_rows<R: DeserializeOwned>(table: &str, rows: Vec<Value>) -> Result<Vec<R>, DomainError> {
    rows.into_iter().map(|row| decode_row(table, row)).collect()
}

pub fn encode_row<R: Serialize>(table: &str, row: &R) -> Result<Value, DomainError> {
    serde_json::to_value(row).map_err(|e| DomainError::Decode(format!("{table}: {e}")))
}

/// Row ids arrive as uuid strings or bigint serials depending on the table.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(D::Error::custom(format!("unsupported id value: {other}"))),
    }
}

/// Treat an explicit `null` column like a missing one.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `timestamptz` columns arrive as RFC 3339; plain `timestamp` columns carry
/// no offset and are read as UTC. Anything else decodes as `None`.
pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Enum columns: an unknown tag decodes as `None` instead of failing the row.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_error_names_table() {
        let err = decode_row::<PostRow>("posts", json!({ "likes": "many" })).unwrap_err();
        match err {
            DomainError::Decode(msg) => assert!(msg.starts_with("posts:")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_timestamp_formats() {
        let parse = |raw: &str| {
            decode_row::<PostRow>("posts", json!({ "created_at": raw }))
                .unwrap()
                .created_at
        };
        let expected = Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).single();

        assert_eq!(parse("2025-02-01T08:00:00+00:00"), expected);
        assert_eq!(parse("2025-02-01T16:00:00+08:00"), expected);
        assert_eq!(parse("2025-02-01T08:00:00"), expected);
        assert_eq!(parse("2025-02-01 08:00:00+00"), expected);
        assert_eq!(
            parse("2025-02-01T08:00:00.250"),
            expected.map(|t| t + chrono::Duration::milliseconds(250))
        );
        assert_eq!(parse("last tuesday"), None);
    }

    #[test]
    fn test_non_string_timestamp_is_none() {
        let row: PostRow = decode_row("posts", json!({ "created_at": 1700000000 })).unwrap();
        assert_eq!(row.created_at, None);
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let row: PostRow = decode_row("posts", json!({ "id": 42 })).unwrap();
        assert_eq!(row.id, "42");
    }
}
