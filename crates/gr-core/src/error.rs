//! Error types for gr-helper

use thiserror::Error;

/// Main error type for gr-helper
#[derive(Debug, Error)]
pub enum GrError {
    /// A comment record without a usable id
    #[error("Comment id is missing or blank")]
    MissingId,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<GrError>,
    },
}

impl GrError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        GrError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for gr-helper
pub type Result<T> = std::result::Result<T, GrError>;
