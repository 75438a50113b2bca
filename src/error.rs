//! Error types for the rating engine and practice service
//!
//! The pure rating core reports failures through [`RatingError`]; everything
//! above it (submission handling, storage, configuration) uses [`ArenaError`]
//! wrapped in `anyhow` for consistent propagation.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Failures raised by the pure rating and statistics functions
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl RatingError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Service-level error types
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error(transparent)]
    Rating(#[from] RatingError),

    #[error("Invalid submission: {reason}")]
    InvalidSubmission { reason: String },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Unsupported language: {language}")]
    UnsupportedLanguage { language: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl ArenaError {
    /// Whether the caller is responsible for the failure (maps to a 4xx response)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ArenaError::Rating(_)
                | ArenaError::InvalidSubmission { .. }
                | ArenaError::InvalidRequest { .. }
                | ArenaError::UnsupportedLanguage { .. }
        )
    }
}
