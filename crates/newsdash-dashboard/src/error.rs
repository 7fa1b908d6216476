use newsdash_core::{ErrorKind, InvalidPeriod};
use thiserror::Error;

/// A failed dashboard API call, classified into the shared taxonomy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    /// HTTP status when the server answered; `None` for transport failures.
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    /// Builds an error from an HTTP failure response.
    ///
    /// Uses the body's `code` and `error` fields when present, otherwise
    /// classifies by status alone.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let field = |name: &str| {
            parsed
                .as_ref()
                .and_then(|v| v.get(name))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };

        let kind = field("code")
            .and_then(|c| ErrorKind::from_code(&c))
            .unwrap_or_else(|| ErrorKind::from_status(status));
        let message = field("error").unwrap_or_else(|| format!("request failed with HTTP {status}"));

        Self::new(kind, Some(status), message)
    }

    #[must_use]
    pub fn is_login_required(&self) -> bool {
        self.kind == ErrorKind::Unauthenticated
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    /// Another operation is still in flight.
    #[error("another operation is in progress")]
    Busy,

    /// A newer request was issued while this one was in flight; its response
    /// was discarded.
    #[error("response superseded by a newer request")]
    Superseded,

    #[error("session expired; login required")]
    LoginRequired,

    #[error(transparent)]
    InvalidPeriod(#[from] InvalidPeriod),

    #[error(transparent)]
    Request(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_response_prefers_body_code() {
        let err = ApiError::from_response(
            403,
            r#"{"error":"Unauthorized access to report","code":"auth_mismatch","request_id":"r1"}"#,
        );
        assert_eq!(err.kind, ErrorKind::AuthMismatch);
        assert_eq!(err.status, Some(403));
        assert_eq!(err.message, "Unauthorized access to report");
    }

    #[test]
    fn from_response_falls_back_to_status() {
        let err = ApiError::from_response(502, "<html>bad gateway</html>");
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
        assert_eq!(err.message, "request failed with HTTP 502");
    }

    #[test]
    fn passthrough_status_keeps_backend_failure() {
        let err = ApiError::from_response(
            404,
            r#"{"error":"Failed to fetch report","code":"backend_failure"}"#,
        );
        assert_eq!(err.kind, ErrorKind::BackendFailure);
        assert_eq!(err.status, Some(404));
    }

    #[test]
    fn unauthorized_requires_login() {
        let err = ApiError::from_response(401, r#"{"error":"Authentication required","code":"unauthorized"}"#);
        assert!(err.is_login_required());
    }
}
