//! Shared domain types for the newsdash workspace.
//!
//! Holds the analytics snapshot schema consumed by every other crate, the
//! company/report identifiers, the analysis period enum with its selector,
//! the client-facing error taxonomy, and environment-driven configuration.

pub mod app_config;
pub mod company;
pub mod config;
pub mod error;
pub mod period;
pub mod sessions;
pub mod snapshot;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use company::{CompanyId, ReportKey};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ErrorKind;
pub use period::{AnalysisPeriod, InvalidPeriod, PeriodSelector};
pub use sessions::{load_sessions, SessionEntry, SessionsFile};
pub use snapshot::{
    AnalyticsSnapshot, CompetitorSummary, CrisisAlert, DailySentiment, DateCount,
    DistributionEntry, FakeNewsDetail, GraphData, NegativeSpike, PastReport, RiskLevel,
    SentimentCounts, SentimentLabel, Statistics, Verdict, Verification, VerifiedNews,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sessions file {path}: {source}")]
    SessionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sessions file: {0}")]
    SessionsFileParse(#[from] serde_yaml::Error),

    #[error("sessions validation failed: {0}")]
    Validation(String),
}
