//! Fakes shared by the gateway and route tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{header, HeaderMap, HeaderValue};
use newsdash_analytics::AnalyticsError;
use newsdash_core::{
    AnalysisPeriod, AnalyticsSnapshot, CompanyId, ReportKey, SessionEntry, SessionsFile,
};

use crate::backend::AnalyticsBackend;
use crate::session::SessionRegistry;

pub const C1_TOKEN: &str = "demo-token-c1";
pub const C2_TOKEN: &str = "demo-token-c2";

pub fn registry() -> SessionRegistry {
    SessionRegistry::from_file(&SessionsFile {
        sessions: vec![
            SessionEntry {
                company_id: "C1".to_string(),
                token_sha256: "9ad67a1744ed38966719cf62592f974e7c2bf89edc30b8f6620bad5520f98e6c"
                    .to_string(),
            },
            SessionEntry {
                company_id: "C2".to_string(),
                token_sha256: "3883a2ec9cab3edb9506529d5137e7d06d340ac13b066fdadf493dfe05c0a5da"
                    .to_string(),
            },
        ],
    })
}

pub fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header"),
    );
    headers
}

/// Backend that records every call and answers with canned data.
#[derive(Default)]
pub struct FakeBackend {
    calls: AtomicU32,
    fail_status: Option<u16>,
    pub last_report: Mutex<Option<ReportKey>>,
    pub last_trigger: Mutex<Option<(CompanyId, AnalysisPeriod)>>,
}

impl FakeBackend {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            fail_status: Some(status),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<(), AnalyticsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_status {
            Some(status) => Err(AnalyticsError::Status {
                status,
                body: "backend said no".to_string(),
            }),
            None => Ok(()),
        }
    }
}

pub fn snapshot_for(company: &CompanyId, timestamp: Option<&str>) -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        company_name: format!("Company {company}"),
        company_id: Some(company.to_string()),
        has_data: true,
        is_today: timestamp.is_none(),
        analysis_date: timestamp.map(str::to_string),
        ..AnalyticsSnapshot::default()
    }
}

#[async_trait]
impl AnalyticsBackend for FakeBackend {
    async fn fetch_live(&self, company: &CompanyId) -> Result<AnalyticsSnapshot, AnalyticsError> {
        self.record()?;
        Ok(snapshot_for(company, None))
    }

    async fn fetch_report(&self, key: &ReportKey) -> Result<AnalyticsSnapshot, AnalyticsError> {
        self.record()?;
        *self.last_report.lock().expect("lock") = Some(key.clone());
        Ok(snapshot_for(&key.company_id, Some(&key.timestamp)))
    }

    async fn trigger_analysis(
        &self,
        company: &CompanyId,
        period: AnalysisPeriod,
    ) -> Result<(), AnalyticsError> {
        self.record()?;
        *self.last_trigger.lock().expect("lock") = Some((company.clone(), period));
        Ok(())
    }
}
