use thiserror::Error;

/// Application-wide error types for Prospect.
#[derive(Error, Debug)]
pub enum AppError {
    /// A fetch attempt for a query failed.
    #[error("Fetch error for '{query}': {message}")]
    FetchError {
        query: String,
        message: String,
        retryable: bool,
    },

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Record cleaning or table derivation failed.
    #[error("Cleaner error: {0}")]
    CleanerError(String),

    /// Writing the output table failed.
    #[error("Sink error: {0}")]
    SinkError(String),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A worker task panicked or was aborted.
    #[error("Task failed for '{query}': {message}")]
    TaskFailed { query: String, message: String },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Returns true if this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::NetworkError(_) | AppError::Timeout(_) | AppError::RateLimitExceeded => true,
            AppError::FetchError { retryable, .. } => *retryable,
            _ => false,
        }
    }

    /// Shorthand for a retryable fetch failure.
    pub fn transient(query: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::FetchError {
            query: query.into(),
            message: message.into(),
            retryable: true,
        }
    }

    /// Shorthand for a fetch failure that retrying will not fix.
    pub fn permanent(query: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::FetchError {
            query: query.into(),
            message: message.into(),
            retryable: false,
        }
    }
}
