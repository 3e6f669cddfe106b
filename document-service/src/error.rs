use error_common::ClinicError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("PDF font error: {0}")]
    Font(String),

    #[error("PDF save error: {0}")]
    Save(String),

    #[error("Export error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DocumentError> for ClinicError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Io(io) => ClinicError::Io(io),
            other => ClinicError::DocumentError(other.to_string()),
        }
    }
}

pub type DocumentResult<T> = Result<T, DocumentError>;
