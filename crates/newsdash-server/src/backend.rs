use async_trait::async_trait;
use newsdash_analytics::{AnalyticsClient, AnalyticsError};
use newsdash_core::{AnalysisPeriod, AnalyticsSnapshot, CompanyId, ReportKey};

/// The analytics service as seen by the gateway.
#[async_trait]
pub trait AnalyticsBackend: Send + Sync {
    async fn fetch_live(&self, company: &CompanyId) -> Result<AnalyticsSnapshot, AnalyticsError>;

    async fn fetch_report(&self, key: &ReportKey) -> Result<AnalyticsSnapshot, AnalyticsError>;

    async fn trigger_analysis(
        &self,
        company: &CompanyId,
        period: AnalysisPeriod,
    ) -> Result<(), AnalyticsError>;
}

#[async_trait]
impl AnalyticsBackend for AnalyticsClient {
    async fn fetch_live(&self, company: &CompanyId) -> Result<AnalyticsSnapshot, AnalyticsError> {
        AnalyticsClient::fetch_live(self, company).await
    }

    async fn fetch_report(&self, key: &ReportKey) -> Result<AnalyticsSnapshot, AnalyticsError> {
        AnalyticsClient::fetch_report(self, key).await
    }

    async fn trigger_analysis(
        &self,
        company: &CompanyId,
        period: AnalysisPeriod,
    ) -> Result<(), AnalyticsError> {
        AnalyticsClient::trigger_analysis(self, company, period).await
    }
}
