//! Error types for support-triage.
//!
//! The triage core is pure computation over in-memory text and cannot
//! fail; errors only arise at the edges (configuration, batch file I/O).

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Missing required argument: {0}")]
    MissingArgument(String),
}

/// Batch loading/persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Email #{index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Input file contains no emails: {0}")]
    Empty(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
