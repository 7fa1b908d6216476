use newsdash_core::ErrorKind;
use thiserror::Error;

/// Errors returned by [`crate::AnalyticsClient`].
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Connect failure, timeout, or a broken response stream.
    #[error("analytics service unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("analytics service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid analytics base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The underlying `reqwest::Client` could not be built.
    #[error("HTTP client construction failed: {0}")]
    Client(#[source] reqwest::Error),
}

impl AnalyticsError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyticsError::Unreachable(_) => ErrorKind::ServiceUnavailable,
            AnalyticsError::Status { .. } => ErrorKind::BackendFailure,
            AnalyticsError::Deserialize { .. }
            | AnalyticsError::InvalidBaseUrl(_)
            | AnalyticsError::Client(_) => ErrorKind::InternalError,
        }
    }

    /// HTTP status to report to callers. Backend statuses pass through.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            AnalyticsError::Status { status, .. } => *status,
            other => other.kind().fixed_status().unwrap_or(500),
        }
    }
}
