//! Typed read/insert helpers over QueryPort. Decode rows and map them to
//! entities in one step.

use crate::domain::DomainError;
use crate::mapper::{decode_row, decode_rows, encode_row};
use crate::ports::{QueryPort, SelectQuery};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Select rows of `table` and map each through its wire row type `R`.
pub(crate) async fn fetch_mapped<R, T>(
    query: &dyn QueryPort,
    table: &str,
    select: &SelectQuery,
) -> Result<Vec<T>, DomainError>
where
    R: DeserializeOwned,
    T: From<R>,
{
    let rows = query.select(table, select).await?;
    Ok(decode_rows::<R>(table, rows)?
        .into_iter()
        .map(T::from)
        .collect())
}

/// Insert `row` and map the stored representation back to an entity.
pub(crate) async fn insert_mapped<W, R, T>(
    query: &dyn QueryPort,
    table: &str,
    row: &W,
) -> Result<T, DomainError>
where
    W: Serialize,
    R: DeserializeOwned,
    T: From<R>,
{
    let payload = encode_row(table, row)?;
    let stored = query.insert(table, payload).await?;
    Ok(T::from(decode_row::<R>(table, stored)?))
}
