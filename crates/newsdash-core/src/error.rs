use serde::{Deserialize, Serialize};

/// Client-facing failure classes shared by the gateway and its consumers.
///
/// The machine code travels in the `code` field of every error body so the
/// dashboard client can recover the exact class from an HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Claimed company differs from the authenticated one.
    AuthMismatch,
    /// The analytics service answered with a non-success status.
    BackendFailure,
    /// The analytics service could not be reached or timed out.
    ServiceUnavailable,
    InternalError,
    /// Request input outside its closed domain (e.g. an unknown period).
    ValidationError,
    /// Session resolution failed.
    #[serde(rename = "unauthorized")]
    Unauthenticated,
}

impl ErrorKind {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::AuthMismatch => "auth_mismatch",
            ErrorKind::BackendFailure => "backend_failure",
            ErrorKind::ServiceUnavailable => "service_unavailable",
            ErrorKind::InternalError => "internal_error",
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::Unauthenticated => "unauthorized",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "auth_mismatch" => Some(ErrorKind::AuthMismatch),
            "backend_failure" => Some(ErrorKind::BackendFailure),
            "service_unavailable" => Some(ErrorKind::ServiceUnavailable),
            "internal_error" => Some(ErrorKind::InternalError),
            "validation_error" => Some(ErrorKind::ValidationError),
            "unauthorized" => Some(ErrorKind::Unauthenticated),
            _ => None,
        }
    }

    /// Best-effort classification of a bare HTTP status with no error code.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Unauthenticated,
            403 => ErrorKind::AuthMismatch,
            400 | 422 => ErrorKind::ValidationError,
            502..=504 => ErrorKind::ServiceUnavailable,
            500 => ErrorKind::InternalError,
            _ => ErrorKind::BackendFailure,
        }
    }

    /// Status code for kinds with a fixed mapping. `BackendFailure` passes the
    /// collaborator's status through and therefore has none.
    #[must_use]
    pub fn fixed_status(self) -> Option<u16> {
        match self {
            ErrorKind::AuthMismatch => Some(403),
            ErrorKind::ServiceUnavailable => Some(503),
            ErrorKind::InternalError => Some(500),
            ErrorKind::ValidationError => Some(400),
            ErrorKind::Unauthenticated => Some(401),
            ErrorKind::BackendFailure => None,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for kind in [
            ErrorKind::AuthMismatch,
            ErrorKind::BackendFailure,
            ErrorKind::ServiceUnavailable,
            ErrorKind::InternalError,
            ErrorKind::ValidationError,
            ErrorKind::Unauthenticated,
        ] {
            assert_eq!(ErrorKind::from_code(kind.code()), Some(kind));
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
        }
    }

    #[test]
    fn backend_failure_has_no_fixed_status() {
        assert_eq!(ErrorKind::BackendFailure.fixed_status(), None);
        assert_eq!(ErrorKind::AuthMismatch.fixed_status(), Some(403));
    }

    #[test]
    fn from_status_classifies_gateway_statuses() {
        assert_eq!(ErrorKind::from_status(503), ErrorKind::ServiceUnavailable);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::BackendFailure);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Unauthenticated);
    }
}
