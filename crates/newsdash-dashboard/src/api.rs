//! Dashboard-facing API of the newsdash server.

use std::time::Duration;

use async_trait::async_trait;
use newsdash_core::{AnalysisPeriod, AnalyticsSnapshot, CompanyId, ErrorKind};
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;

use crate::error::ApiError;
use crate::retry::retry_with_backoff;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Operations the report controller needs from the server.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Current snapshot of the session's company.
    async fn fetch_live(&self) -> Result<AnalyticsSnapshot, ApiError>;

    /// Starts a new analysis. Not idempotent.
    async fn trigger_analysis(
        &self,
        company: &CompanyId,
        period: AnalysisPeriod,
    ) -> Result<(), ApiError>;

    async fn fetch_report(
        &self,
        company: &CompanyId,
        timestamp: &str,
    ) -> Result<AnalyticsSnapshot, ApiError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriggerRequest<'a> {
    company_id: &'a str,
    analysis_period: AnalysisPeriod,
}

/// [`DashboardApi`] over HTTP with bearer-token sessions.
///
/// Reads are retried on transient failures; triggers never are.
#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    client: Client,
    base_url: Url,
    session_token: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl HttpDashboardApi {
    /// # Errors
    ///
    /// Returns an [`ErrorKind::InternalError`] [`ApiError`] if the client
    /// cannot be built or `base_url` is not an absolute http(s) URL.
    pub fn new(
        base_url: &str,
        session_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("newsdash-dashboard/0.1")
            .build()
            .map_err(|e| ApiError::new(ErrorKind::InternalError, None, e.to_string()))?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| {
            ApiError::new(
                ErrorKind::InternalError,
                None,
                format!("invalid API URL '{base_url}': {e}"),
            )
        })?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::new(
                ErrorKind::InternalError,
                None,
                format!("invalid API URL '{base_url}'"),
            ));
        }

        Ok(Self {
            client,
            base_url: base,
            session_token,
            max_retries: 2,
            backoff_base_ms: 500,
        })
    }

    /// Overrides the read retry policy.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::new(ErrorKind::InternalError, None, "API URL cannot take a path")
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(&e))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::from_response(status.as_u16(), &body))
        }
    }

    async fn get_snapshot(&self, url: Url) -> Result<AnalyticsSnapshot, ApiError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let body = self.send(self.client.get(url)).await?;
                let snapshot: AnalyticsSnapshot = serde_json::from_str(&body).map_err(|e| {
                    ApiError::new(
                        ErrorKind::InternalError,
                        None,
                        format!("malformed snapshot: {e}"),
                    )
                })?;
                Ok(snapshot.normalized())
            }
        })
        .await
    }
}

fn transport_error(err: &reqwest::Error) -> ApiError {
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        format!("service unreachable: {err}")
    };
    ApiError::new(ErrorKind::ServiceUnavailable, None, message)
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn fetch_live(&self) -> Result<AnalyticsSnapshot, ApiError> {
        let url = self.url(&["api", "company", "dashboard"])?;
        self.get_snapshot(url).await
    }

    async fn trigger_analysis(
        &self,
        company: &CompanyId,
        period: AnalysisPeriod,
    ) -> Result<(), ApiError> {
        let url = self.url(&["api", "company", "fetch-news"])?;
        let body = TriggerRequest {
            company_id: company.as_str(),
            analysis_period: period,
        };
        self.send(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    async fn fetch_report(
        &self,
        company: &CompanyId,
        timestamp: &str,
    ) -> Result<AnalyticsSnapshot, ApiError> {
        let url = self.url(&["api", "company", "report", company.as_str(), timestamp])?;
        self.get_snapshot(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_url_encodes_segments() {
        let api = HttpDashboardApi::new("http://localhost:3000/", None, 15).unwrap();
        let url = api
            .url(&["api", "company", "report", "C1", "2025-01-01 09:00"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/company/report/C1/2025-01-01%2009:00"
        );
    }

    #[test]
    fn rejects_relative_url() {
        let err = HttpDashboardApi::new("localhost", None, 15).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InternalError);
    }
}
