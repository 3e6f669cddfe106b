use thiserror::Error;

use crate::codes;

/// Application-wide error enum
#[derive(Error, Debug)]
pub enum ClinicError {
    /// Input validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No practitioner is signed in, or the session cannot be used
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// The requested row does not exist for the signed-in practitioner
    #[error("Not found: {0}")]
    NotFound(String),

    /// The hosted database rejected the request
    #[error("Remote store error: {0}")]
    StoreError(String),

    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Identity provider errors
    #[error("Identity provider error: {0}")]
    IdentityError(String),

    /// PDF rendering errors
    #[error("Document error: {0}")]
    DocumentError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClinicError {
    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            ClinicError::ValidationError(_) => codes::validation::INVALID_INPUT,
            ClinicError::AuthError(_) => codes::authentication::NOT_SIGNED_IN,
            ClinicError::IdentityError(_) => codes::authentication::IDENTITY_PROVIDER,
            ClinicError::NotFound(_) => codes::store::NOT_FOUND,
            ClinicError::StoreError(_) => codes::store::REQUEST_FAILED,
            ClinicError::NetworkError(_) => codes::store::NETWORK,
            ClinicError::DocumentError(_) => codes::system::DOCUMENT,
            ClinicError::ConfigError(_) => codes::system::CONFIGURATION,
            ClinicError::Io(_) => codes::system::IO,
            ClinicError::Other(_) => codes::system::INTERNAL,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClinicError::NotFound(_))
    }

    pub fn not_signed_in() -> Self {
        ClinicError::AuthError("no practitioner is signed in".to_string())
    }
}

/// Result type alias for ClinicDesk operations
pub type ClinicResult<T> = std::result::Result<T, ClinicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_category_specific() {
        assert_eq!(ClinicError::NotFound("patient".into()).code(), "STORE_4001");
        assert_eq!(ClinicError::not_signed_in().code(), "AUTH_2001");
        assert_eq!(
            ClinicError::ValidationError("empty name".into()).code(),
            "VALIDATION_1001"
        );
    }

    #[test]
    fn test_display_includes_category() {
        let err = ClinicError::StoreError("permission denied for table billing".into());
        assert_eq!(
            err.to_string(),
            "Remote store error: permission denied for table billing"
        );
        assert!(ClinicError::NotFound("bill".into()).is_not_found());
    }
}
