// In-process store honouring the same query model as the hosted database
use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{tables, Row};
use crate::query::{Direction, Filter, Query, Select};
use crate::store::{expect_single, RemoteStore};

/// Tables kept in memory.
///
/// Generates `id`, `created_at` and `updated_at` like the hosted database
/// does, resolves embeds through their foreign key, and can be told to fail
/// the next call so error paths can be exercised.
#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    failure: Mutex<Option<String>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store with the clinic tables
    pub fn new() -> Self {
        let tables = tables::ALL
            .iter()
            .map(|name| ((*name).to_string(), Vec::new()))
            .collect();
        Self {
            tables: Mutex::new(tables),
            failure: Mutex::new(None),
        }
    }

    /// Insert rows verbatim, bypassing id and timestamp generation
    pub fn seed(&self, table: &str, rows: Vec<Value>) -> DatabaseResult<()> {
        let mut tables = self.tables.lock();
        let stored = tables
            .get_mut(table)
            .ok_or_else(|| DatabaseError::UnknownTable(table.to_string()))?;
        for row in rows {
            stored.push(into_row(row)?);
        }
        Ok(())
    }

    /// Raw contents of `table`, in insertion order
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .get(table)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    /// Make the next operation fail with `message`
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    fn take_failure(&self) -> DatabaseResult<()> {
        match self.failure.lock().take() {
            Some(message) => Err(DatabaseError::ConnectionFailed(message)),
            None => Ok(()),
        }
    }

    fn project(tables: &HashMap<String, Vec<Row>>, row: &Row, select: &Select) -> Value {
        let mut out = if select.is_all() {
            row.clone()
        } else {
            select
                .column_names()
                .iter()
                .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
                .collect()
        };

        for embed in select.embeds() {
            let target = row
                .get(&embed.foreign_key)
                .and_then(|fk| text_of(fk))
                .and_then(|fk| {
                    tables.get(&embed.relation).and_then(|rows| {
                        rows.iter()
                            .find(|r| r.get("id").and_then(text_of).as_deref() == Some(fk.as_str()))
                    })
                });

            let value = match target {
                Some(target) => Value::Object(
                    embed
                        .columns
                        .iter()
                        .filter_map(|c| target.get(c).map(|v| (c.clone(), v.clone())))
                        .collect(),
                ),
                None => Value::Null,
            };
            out.insert(embed.relation.clone(), value);
        }

        Value::Object(out)
    }

    fn finish(table: &str, query: &Query, rows: Vec<Value>) -> DatabaseResult<Vec<Value>> {
        if query.single {
            expect_single(table, rows).map(|row| vec![row])
        } else {
            Ok(rows)
        }
    }
}

fn into_row(value: Value) -> DatabaseResult<Row> {
    match value {
        Value::Object(row) => Ok(row),
        other => Err(DatabaseError::InvalidPayload(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Text form of a scalar, as PostgREST compares filter values
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn matches(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| {
        row.get(&filter.column)
            .and_then(text_of)
            .is_some_and(|value| value == filter.value)
    })
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn is_null(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn sort_rows(rows: &mut [Row], query: &Query) {
    rows.sort_by(|a, b| {
        for order in &query.order {
            let (x, y) = (a.get(&order.column), b.get(&order.column));
            // Postgres default: NULLS LAST ascending, NULLS FIRST descending
            let ordering = match (is_null(x), is_null(y)) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => compare_values(x, y),
            };
            let ordering = match order.direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn select(&self, table: &str, query: &Query) -> DatabaseResult<Vec<Value>> {
        self.take_failure()?;
        let tables = self.tables.lock();
        let rows = tables
            .get(table)
            .ok_or_else(|| DatabaseError::UnknownTable(table.to_string()))?;

        let mut selected: Vec<Row> = rows
            .iter()
            .filter(|row| matches(row, &query.filters))
            .cloned()
            .collect();
        sort_rows(&mut selected, query);

        let projected = selected
            .iter()
            .map(|row| Self::project(&tables, row, &query.select))
            .collect();
        Self::finish(table, query, projected)
    }

    async fn insert(&self, table: &str, row: Value, query: &Query) -> DatabaseResult<Vec<Value>> {
        self.take_failure()?;
        let mut row = into_row(row)?;
        let now = Value::String(Utc::now().to_rfc3339());
        if !row.contains_key("id") {
            row.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }
        row.entry("created_at").or_insert_with(|| now.clone());
        row.entry("updated_at").or_insert(now);

        let mut tables = self.tables.lock();
        tables
            .get_mut(table)
            .ok_or_else(|| DatabaseError::UnknownTable(table.to_string()))?
            .push(row.clone());

        let projected = Self::project(&tables, &row, &query.select);
        Self::finish(table, query, vec![projected])
    }

    async fn update(&self, table: &str, changes: Value, query: &Query) -> DatabaseResult<Vec<Value>> {
        self.take_failure()?;
        let changes = into_row(changes)?;
        let now = Value::String(Utc::now().to_rfc3339());

        let mut tables = self.tables.lock();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| DatabaseError::UnknownTable(table.to_string()))?;

        let matching = rows.iter().filter(|row| matches(row, &query.filters)).count();
        if query.single && matching != 1 {
            return Self::finish(table, query, Vec::new());
        }

        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|row| matches(row, &query.filters)) {
            for (key, value) in &changes {
                row.insert(key.clone(), value.clone());
            }
            row.insert("updated_at".to_string(), now.clone());
            updated.push(row.clone());
        }

        let projected = updated
            .iter()
            .map(|row| Self::project(&tables, row, &query.select))
            .collect();
        Self::finish(table, query, projected)
    }

    async fn delete(&self, table: &str, query: &Query) -> DatabaseResult<()> {
        self.take_failure()?;
        let mut tables = self.tables.lock();
        tables
            .get_mut(table)
            .ok_or_else(|| DatabaseError::UnknownTable(table.to_string()))?
            .retain(|row| !matches(row, &query.filters));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Embed, Order};
    use serde_json::json;

    #[tokio::test]
    async fn test_embeds_resolve_through_foreign_key() {
        let store = MemoryStore::new();
        store
            .seed(
                "patients",
                vec![json!({"id": "p1", "full_name": "Asha Rao", "phone": "555-0100", "doctor_id": "d1"})],
            )
            .unwrap();
        store
            .seed(
                "appointments",
                vec![json!({"id": "a1", "patient_id": "p1", "doctor_id": "d1"})],
            )
            .unwrap();

        let query = Query::new()
            .select(Select::all().embed(Embed::new("patients", "patient_id", &["id", "full_name"])))
            .eq("doctor_id", "d1");
        let rows = store.select("appointments", &query).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["patients"], json!({"id": "p1", "full_name": "Asha Rao"}));
    }

    #[tokio::test]
    async fn test_ordering_puts_nulls_last_ascending() {
        let store = MemoryStore::new();
        store
            .seed(
                "teleconsultations",
                vec![
                    json!({"id": "t1", "date": "2024-06-11", "time": "09:00:00"}),
                    json!({"id": "t2", "date": null, "time": "08:00:00"}),
                    json!({"id": "t3", "date": "2024-06-10", "time": "15:00:00"}),
                    json!({"id": "t4", "date": "2024-06-10", "time": "10:30:00"}),
                ],
            )
            .unwrap();

        let query = Query::new().order(Order::asc("date")).order(Order::asc("time"));
        let ids: Vec<_> = store
            .select("teleconsultations", &query)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect();

        assert_eq!(ids, vec!["t4", "t3", "t1", "t2"]);
    }

    #[tokio::test]
    async fn test_single_update_without_match_is_not_found() {
        let store = MemoryStore::new();
        store
            .seed("billing", vec![json!({"id": "b1", "doctor_id": "d1", "status": "pending"})])
            .unwrap();

        let query = Query::new().eq("id", "b1").eq("doctor_id", "intruder").single();
        let result = store.update("billing", json!({"status": "paid"}), &query).await;

        assert!(matches!(result, Err(DatabaseError::RowNotFound(_))));
        assert_eq!(store.rows("billing")[0]["status"], "pending");
    }

    #[tokio::test]
    async fn test_injected_failure_is_consumed_once() {
        let store = MemoryStore::new();
        store.fail_next("connection reset by peer");

        assert!(store.select("patients", &Query::new()).await.is_err());
        assert!(store.select("patients", &Query::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_insert_generates_identity_and_timestamps() {
        let store = MemoryStore::new();
        let rows = store
            .insert("patients", json!({"full_name": "Ravi Kumar"}), &Query::new().single())
            .await
            .unwrap();

        let row = &rows[0];
        assert!(Uuid::parse_str(row["id"].as_str().unwrap()).is_ok());
        assert!(row["created_at"].is_string());
        assert!(store.insert("unknown", json!({}), &Query::new()).await.is_err());
    }
}
