use database_layer::{Order, Select};
use error_common::ClinicResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Where a newly created row goes in the local list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Prepend,
    Append,
}

/// User-facing notification texts for one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub fetch_failed: &'static str,
    pub added: &'static str,
    pub add_failed: &'static str,
    pub updated: &'static str,
    pub update_failed: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
}

/// A row type backed by one owner-scoped table
pub trait Entity: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Insert payload, without `doctor_id`
    type Draft: Serialize + Send + Sync;
    /// Partial update payload; unset fields are left untouched
    type Changes: Serialize + Send + Sync;

    const TABLE: &'static str;
    /// Lowercase singular used in log lines ("patient")
    const NAME: &'static str;
    const INSERT_POSITION: InsertPosition;
    const MESSAGES: Messages;

    fn id(&self) -> Uuid;

    /// Projection shared by fetches and mutation responses
    fn select() -> Select;

    fn ordering() -> Vec<Order>;

    /// Local checks run before a draft is sent
    fn validate_draft(_draft: &Self::Draft) -> ClinicResult<()> {
        Ok(())
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> ClinicResult<()> {
    if value.trim().is_empty() {
        return Err(error_common::ClinicError::ValidationError(format!(
            "{field} is required"
        )));
    }
    Ok(())
}
