pub mod redactor;
pub mod macros;
pub mod config;

pub use redactor::*;
pub use config::*;

/// Logging setup with automatic PII redaction
///
/// Clinic data flows through every error message the hosted database
/// returns: duplicate-key errors echo email addresses, constraint errors echo
/// phone numbers. Everything that reaches the log from a failed remote call is
/// passed through [`redact`] first.
///
/// # Detected Data Types
///
/// - **Email Addresses**: asha.rao@example.com → a***@e***
/// - **Phone Numbers**: 555-123-4567 / +91 98765 43210 → ***-***-****
/// - **Custom Patterns**: configurable regex replacements
///
/// # Example
///
/// ```rust
/// use logger_redacted::{init_logging, redact, LoggerConfig};
///
/// init_logging(&LoggerConfig::default()).ok();
/// assert_eq!(redact("call 555-123-4567"), "call ***-***-****");
/// ```
use lazy_static::lazy_static;
use parking_lot::RwLock;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

lazy_static! {
    static ref GLOBAL_REDACTOR: RwLock<PiiRedactor> = RwLock::new(PiiRedactor::default());
}

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log filter '{0}'")]
    InvalidFilter(String),

    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(String),
}

impl From<LoggerError> for error_common::ClinicError {
    fn from(err: LoggerError) -> Self {
        error_common::ClinicError::ConfigError(err.to_string())
    }
}

/// Install the global tracing subscriber and configure the global redactor.
pub fn init_logging(config: &LoggerConfig) -> Result<(), LoggerError> {
    set_redaction(RedactionConfig {
        enabled: config.redaction_enabled,
        hash_for_correlation: config.hash_for_correlation,
        ..Default::default()
    });

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|_| LoggerError::InvalidFilter(config.level.clone()))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}

/// Replace the configuration of the global redactor.
pub fn set_redaction(config: RedactionConfig) {
    *GLOBAL_REDACTOR.write() = PiiRedactor::new(config);
}

/// Redact PII from `text` with the global redactor.
pub fn redact(text: &str) -> String {
    GLOBAL_REDACTOR.read().redact(text)
}
