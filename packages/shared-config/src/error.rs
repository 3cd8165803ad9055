//! Configuration error types

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Missing required environment variable
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Value could not be parsed into the expected type
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// Value parsed but is outside the accepted set
    #[error("unsupported value for {name}: {value} (expected one of: {expected})")]
    Unsupported {
        name: String,
        value: String,
        expected: &'static str,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
