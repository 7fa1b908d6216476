//! Access gateway between the dashboard and the analytics service.
//!
//! Every operation first resolves the caller's company from the session and
//! only then talks to the backend. A request naming another company is
//! refused without any backend call. The gateway never retries.

use std::sync::Arc;

use axum::http::HeaderMap;
use newsdash_analytics::AnalyticsError;
use newsdash_core::{AnalysisPeriod, AnalyticsSnapshot, CompanyId, ErrorKind, ReportKey};
use thiserror::Error;

use crate::backend::AnalyticsBackend;
use crate::session::{SessionError, SessionResolver};

pub const AUTH_MISMATCH_MESSAGE: &str = "Unauthorized access to report";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Live,
    Report,
    Trigger,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Live => "Failed to load dashboard",
            Operation::Report => "Failed to fetch report",
            Operation::Trigger => "Failed to fetch news",
        }
    }

    fn unavailable_message(self) -> &'static str {
        match self {
            Operation::Report => "Report service is currently unavailable",
            Operation::Live | Operation::Trigger => "Analytics service is currently unavailable",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Live => write!(f, "live snapshot"),
            Operation::Report => write!(f, "report fetch"),
            Operation::Trigger => write!(f, "analysis trigger"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("session resolution failed: {0}")]
    Unauthenticated(#[from] SessionError),

    #[error("company {authenticated} requested data of company {claimed}")]
    AuthMismatch {
        claimed: String,
        authenticated: CompanyId,
    },

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("{operation} failed: {source}")]
    Backend {
        operation: Operation,
        #[source]
        source: AnalyticsError,
    },
}

impl GatewayError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Unauthenticated(_) => ErrorKind::Unauthenticated,
            GatewayError::AuthMismatch { .. } => ErrorKind::AuthMismatch,
            GatewayError::Validation(_) => ErrorKind::ValidationError,
            GatewayError::Backend { source, .. } => source.kind(),
        }
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::Backend { source, .. } => source.status(),
            other => other.kind().fixed_status().unwrap_or(500),
        }
    }

    /// Message safe to show the caller. Backend details stay in the logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::Unauthenticated(_) => "Authentication required".to_string(),
            GatewayError::AuthMismatch { .. } => AUTH_MISMATCH_MESSAGE.to_string(),
            GatewayError::Validation(msg) => msg.clone(),
            GatewayError::Backend { operation, source } => match source.kind() {
                ErrorKind::BackendFailure => operation.failure_message().to_string(),
                ErrorKind::ServiceUnavailable => operation.unavailable_message().to_string(),
                _ => "Internal server error".to_string(),
            },
        }
    }
}

#[derive(Clone)]
pub struct Gateway {
    sessions: Arc<dyn SessionResolver>,
    backend: Arc<dyn AnalyticsBackend>,
}

impl Gateway {
    pub fn new(sessions: Arc<dyn SessionResolver>, backend: Arc<dyn AnalyticsBackend>) -> Self {
        Self { sessions, backend }
    }

    /// Live snapshot of the caller's own company.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn fetch_live(&self, headers: &HeaderMap) -> Result<AnalyticsSnapshot, GatewayError> {
        let company = self.authenticate(headers).await?;
        self.backend
            .fetch_live(&company)
            .await
            .map_err(|source| backend_error(Operation::Live, &company, source))
    }

    /// Historical snapshot `(claimed, timestamp)`, served only when `claimed`
    /// is the caller's own company.
    ///
    /// # Errors
    ///
    /// [`GatewayError::AuthMismatch`] when `claimed` differs from the session
    /// company; otherwise see [`GatewayError`].
    pub async fn fetch_report(
        &self,
        headers: &HeaderMap,
        claimed: &str,
        timestamp: &str,
    ) -> Result<AnalyticsSnapshot, GatewayError> {
        let company = self.authenticate(headers).await?;
        ensure_same_company(claimed, &company)?;

        let key = ReportKey::new(company.clone(), timestamp);
        self.backend
            .fetch_report(&key)
            .await
            .map_err(|source| backend_error(Operation::Report, &company, source))
    }

    /// Starts a new analysis for the caller's company.
    ///
    /// `claimed` may be omitted; when present it must match the session.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Validation`] for a period outside
    /// today/week/month/year; otherwise see [`GatewayError`].
    pub async fn trigger_analysis(
        &self,
        headers: &HeaderMap,
        claimed: Option<&str>,
        period: &str,
    ) -> Result<AnalysisPeriod, GatewayError> {
        let company = self.authenticate(headers).await?;
        if let Some(claimed) = claimed {
            ensure_same_company(claimed, &company)?;
        }

        let period: AnalysisPeriod = period
            .parse()
            .map_err(|e: newsdash_core::InvalidPeriod| GatewayError::Validation(e.to_string()))?;

        self.backend
            .trigger_analysis(&company, period)
            .await
            .map_err(|source| backend_error(Operation::Trigger, &company, source))?;

        Ok(period)
    }

    /// Resolves the session company, or fails with
    /// [`GatewayError::Unauthenticated`].
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<CompanyId, GatewayError> {
        self.sessions.resolve(headers).await.map_err(|e| {
            tracing::info!(error = %e, "session resolution failed");
            GatewayError::from(e)
        })
    }
}

fn ensure_same_company(claimed: &str, company: &CompanyId) -> Result<(), GatewayError> {
    if claimed == company.as_str() {
        return Ok(());
    }
    tracing::warn!(
        claimed,
        authenticated = %company,
        "company identity mismatch; request refused"
    );
    Err(GatewayError::AuthMismatch {
        claimed: claimed.to_string(),
        authenticated: company.clone(),
    })
}

fn backend_error(operation: Operation, company: &CompanyId, source: AnalyticsError) -> GatewayError {
    match &source {
        AnalyticsError::Status { status, .. } => {
            tracing::error!(%operation, company = %company, status, error = %source, "analytics service returned an error");
        }
        AnalyticsError::Unreachable(_) => {
            tracing::error!(%operation, company = %company, error = %source, "analytics service unreachable");
        }
        _ => {
            tracing::error!(%operation, company = %company, error = %source, "analytics request failed");
        }
    }
    GatewayError::Backend { operation, source }
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;
