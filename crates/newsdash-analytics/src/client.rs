//! Client for the analytics service.
//!
//! The service owns every snapshot; this client only reads them and asks for
//! new analyses. Received snapshots are normalized before they are returned,
//! so scores are always inside their declared ranges.

use std::time::Duration;

use newsdash_core::{AnalysisPeriod, AnalyticsSnapshot, CompanyId, ReportKey};
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;

use crate::error::AnalyticsError;

/// Longest error body kept on [`AnalyticsError::Status`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriggerRequest<'a> {
    company_id: &'a str,
    analysis_period: AnalysisPeriod,
}

#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    client: Client,
    base_url: Url,
}

impl AnalyticsClient {
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Client`] if the `reqwest::Client` cannot be
    /// built, or [`AnalyticsError::InvalidBaseUrl`] if `base_url` does not
    /// parse as an absolute http(s) URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, AnalyticsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("newsdash/0.1 (report-gateway)")
            .build()
            .map_err(AnalyticsError::Client)?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised)
            .map_err(|_| AnalyticsError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(AnalyticsError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Fetches the current snapshot for a company.
    ///
    /// A company with no analysis yet comes back as a `has_data: false`
    /// snapshot, not an error.
    ///
    /// # Errors
    ///
    /// See [`AnalyticsError`].
    pub async fn fetch_live(
        &self,
        company: &CompanyId,
    ) -> Result<AnalyticsSnapshot, AnalyticsError> {
        let url = self.build_url(&["api", "company", "dashboard", company.as_str()])?;
        tracing::debug!(company = %company, "fetching live snapshot");
        self.request_snapshot(self.client.get(url.clone()), &url)
            .await
    }

    /// Fetches the immutable snapshot captured at `key.timestamp`.
    ///
    /// # Errors
    ///
    /// See [`AnalyticsError`]. An unknown timestamp surfaces as
    /// [`AnalyticsError::Status`] with the service's status code.
    pub async fn fetch_report(&self, key: &ReportKey) -> Result<AnalyticsSnapshot, AnalyticsError> {
        let url = self.build_url(&[
            "api",
            "company",
            "report",
            key.company_id.as_str(),
            key.timestamp.as_str(),
        ])?;
        tracing::debug!(company = %key.company_id, timestamp = %key.timestamp, "fetching report");
        self.request_snapshot(self.client.get(url.clone()), &url)
            .await
    }

    /// Asks the service to run a new analysis. Not idempotent: every call
    /// produces a new snapshot.
    ///
    /// # Errors
    ///
    /// See [`AnalyticsError`].
    pub async fn trigger_analysis(
        &self,
        company: &CompanyId,
        period: AnalysisPeriod,
    ) -> Result<(), AnalyticsError> {
        let url = self.build_url(&["api", "company", "fetch-news"])?;
        let body = TriggerRequest {
            company_id: company.as_str(),
            analysis_period: period,
        };
        tracing::info!(company = %company, period = %period, "triggering analysis");

        self.send(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn build_url(&self, segments: &[&str]) -> Result<Url, AnalyticsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AnalyticsError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, AnalyticsError> {
        let response = request.send().await.map_err(AnalyticsError::Unreachable)?;
        let status = response.status();
        let body = response.text().await.map_err(AnalyticsError::Unreachable)?;

        if !status.is_success() {
            let mut body = body;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(AnalyticsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    async fn request_snapshot(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<AnalyticsSnapshot, AnalyticsError> {
        let body = self.send(request).await?;
        let snapshot: AnalyticsSnapshot =
            serde_json::from_str(&body).map_err(|e| AnalyticsError::Deserialize {
                context: url.path().to_string(),
                source: e,
            })?;
        Ok(snapshot.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> AnalyticsClient {
        AnalyticsClient::new(base_url, 15).expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_segments() {
        let client = test_client("http://localhost:8002");
        let url = client
            .build_url(&["api", "company", "dashboard", "C1"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8002/api/company/dashboard/C1");
    }

    #[test]
    fn build_url_keeps_base_path_prefix() {
        let client = test_client("http://analytics.local/v2/");
        let url = client.build_url(&["api", "company", "fetch-news"]).unwrap();
        assert_eq!(url.as_str(), "http://analytics.local/v2/api/company/fetch-news");
    }

    #[test]
    fn build_url_encodes_segments() {
        let client = test_client("http://localhost:8002");
        let url = client
            .build_url(&["api", "company", "report", "C 1", "2025/01/01"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8002/api/company/report/C%201/2025%2F01%2F01"
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        assert!(matches!(
            AnalyticsClient::new("ftp://example.com", 15),
            Err(AnalyticsError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            AnalyticsClient::new("not a url", 15),
            Err(AnalyticsError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn trigger_body_uses_camel_case() {
        let body = TriggerRequest {
            company_id: "C1",
            analysis_period: AnalysisPeriod::Week,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"companyId": "C1", "analysisPeriod": "week"})
        );
    }
}
