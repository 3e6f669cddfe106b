use async_trait::async_trait;
use serde_json::Value;

use crate::error::{DatabaseError, DatabaseResult};
use crate::query::Query;

/// Table-level operations against the hosted database.
///
/// Implementations never retry: a failed call is reported once and returned.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Rows matching `query`, in the query's order
    async fn select(&self, table: &str, query: &Query) -> DatabaseResult<Vec<Value>>;

    /// Insert one row and return it as stored, projected through `query.select`
    async fn insert(&self, table: &str, row: Value, query: &Query) -> DatabaseResult<Vec<Value>>;

    /// Apply `changes` to every row matching `query` and return the updated rows
    async fn update(&self, table: &str, changes: Value, query: &Query) -> DatabaseResult<Vec<Value>>;

    /// Delete every row matching `query`
    async fn delete(&self, table: &str, query: &Query) -> DatabaseResult<()>;

    /// Whether the backend answers at all
    async fn is_healthy(&self) -> bool {
        true
    }
}

/// Collapse a `single` result into its only row
pub fn expect_single(table: &str, rows: Vec<Value>) -> DatabaseResult<Value> {
    let count = rows.len();
    let mut rows = rows.into_iter();
    match (rows.next(), count) {
        (Some(row), 1) => Ok(row),
        (None, _) => Err(DatabaseError::RowNotFound(table.to_string())),
        (Some(_), count) => Err(DatabaseError::MultipleRows {
            table: table.to_string(),
            count,
        }),
    }
}
