// Row scoping: every operation is filtered by the owning practitioner
use serde_json::Value;

use crate::error::{DatabaseError, DatabaseResult};
use crate::models::PractitionerId;
use crate::query::Query;

/// Column holding the owner on every clinical table
pub const OWNER_COLUMN: &str = "doctor_id";

/// Owner context applied to queries and inserted rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerScope {
    practitioner: PractitionerId,
    column: &'static str,
}

impl OwnerScope {
    pub fn new(practitioner: PractitionerId) -> Self {
        Self {
            practitioner,
            column: OWNER_COLUMN,
        }
    }

    /// Scope on a different owner column (`profiles.user_id`)
    pub fn on_column(mut self, column: &'static str) -> Self {
        self.column = column;
        self
    }

    pub fn practitioner(&self) -> &PractitionerId {
        &self.practitioner
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    /// Restrict `query` to rows owned by this practitioner
    pub fn apply(&self, query: Query) -> Query {
        query.eq(self.column, self.practitioner.as_str())
    }

    /// Scope a single-row mutation by both row id and owner
    pub fn row(&self, id: impl ToString) -> Query {
        self.apply(Query::new().eq("id", id.to_string()))
    }

    /// Stamp the owner onto an insert payload, overriding whatever the caller sent
    pub fn stamp(&self, payload: Value) -> DatabaseResult<Value> {
        match payload {
            Value::Object(mut row) => {
                row.insert(
                    self.column.to_string(),
                    Value::String(self.practitioner.to_string()),
                );
                Ok(Value::Object(row))
            }
            other => Err(DatabaseError::InvalidPayload(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Reject update payloads that would move a row to another owner
    pub fn guard_changes(&self, changes: &Value) -> DatabaseResult<()> {
        let Some(row) = changes.as_object() else {
            return Err(DatabaseError::InvalidPayload(
                "expected a JSON object".to_string(),
            ));
        };
        match row.get(self.column) {
            Some(Value::String(owner)) if owner != self.practitioner.as_str() => {
                Err(DatabaseError::RlsPolicyViolation(format!(
                    "{} cannot be reassigned",
                    self.column
                )))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scope_adds_owner_filter() {
        let scope = OwnerScope::new(PractitionerId::new("user_123"));
        let query = scope.row("0b6c4c1e-0000-4000-8000-000000000001");

        let params = query.filter_params();
        assert_eq!(params.len(), 2);
        assert!(params.contains(&("doctor_id".to_string(), "eq.user_123".to_string())));
        assert!(params.contains(&(
            "id".to_string(),
            "eq.0b6c4c1e-0000-4000-8000-000000000001".to_string()
        )));
    }

    #[test]
    fn test_stamp_overrides_owner() {
        let scope = OwnerScope::new(PractitionerId::new("user_123"));
        let row = scope
            .stamp(json!({"full_name": "Asha Rao", "doctor_id": "user_999"}))
            .unwrap();
        assert_eq!(row["doctor_id"], "user_123");
        assert!(scope.stamp(json!(["not", "an", "object"])).is_err());
    }

    #[test]
    fn test_guard_rejects_reassignment() {
        let scope = OwnerScope::new(PractitionerId::new("user_123"));
        assert!(scope.guard_changes(&json!({"status": "paid"})).is_ok());
        assert!(scope.guard_changes(&json!({"doctor_id": "user_123"})).is_ok());
        assert!(matches!(
            scope.guard_changes(&json!({"doctor_id": "user_999"})),
            Err(DatabaseError::RlsPolicyViolation(_))
        ));
    }
}
