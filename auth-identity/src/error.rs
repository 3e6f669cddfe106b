use database_layer::DatabaseError;
use error_common::ClinicError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Not signed in")]
    NotSignedIn,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid user id")]
    InvalidUserId,

    #[error("Identity provider rejected the secret key")]
    Unauthorized,

    #[error("Identity provider is not configured: {0}")]
    NotConfigured(String),

    #[error("Identity provider error ({status}): {message}")]
    ProviderError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Session file error: {0}")]
    SessionFile(#[from] std::io::Error),

    #[error("Corrupt session: {0}")]
    CorruptSession(serde_json::Error),

    #[error("Malformed identity data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Profile error: {0}")]
    Profile(#[from] DatabaseError),
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        IdentityError::Network(err.to_string())
    }
}

impl From<IdentityError> for ClinicError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotSignedIn => ClinicError::not_signed_in(),
            IdentityError::InvalidUserId => ClinicError::ValidationError(err.to_string()),
            IdentityError::NotConfigured(_) => ClinicError::ConfigError(err.to_string()),
            IdentityError::SessionFile(io) => ClinicError::Io(io),
            IdentityError::Profile(db) => db.into(),
            IdentityError::Network(_) => ClinicError::NetworkError(err.to_string()),
            other => ClinicError::IdentityError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;
