use serde::Deserialize;
use thiserror::Error;

/// Error body returned by the PostgREST endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BackendError {
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed ({status}): {}", .error.message)]
    QueryFailed { status: u16, error: BackendError },

    #[error("Row not found in {0}")]
    RowNotFound(String),

    #[error("Expected a single row from {table}, got {count}")]
    MultipleRows { table: String, count: usize },

    #[error("RLS policy violation on {0}")]
    RlsPolicyViolation(String),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Invalid row payload: {0}")]
    InvalidPayload(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for DatabaseError {
    fn from(err: reqwest::Error) -> Self {
        DatabaseError::ConnectionFailed(err.to_string())
    }
}

impl From<DatabaseError> for error_common::ClinicError {
    fn from(err: DatabaseError) -> Self {
        use error_common::ClinicError;
        match err {
            DatabaseError::RowNotFound(_) => ClinicError::NotFound(err.to_string()),
            DatabaseError::ConnectionFailed(_) => ClinicError::NetworkError(err.to_string()),
            other => ClinicError::StoreError(other.to_string()),
        }
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
