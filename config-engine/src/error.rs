use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration parsing failed: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for error_common::ClinicError {
    fn from(err: ConfigError) -> Self {
        error_common::ClinicError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
