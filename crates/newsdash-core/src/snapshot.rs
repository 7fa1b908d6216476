//! Analytics snapshot schema.
//!
//! Snapshots are produced by the external analytics service and consumed
//! read-only. Every nested group is either optional (present or absent) or
//! carries a declared default, so consumers never probe for missing keys.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::period::AnalysisPeriod;

/// Gauge value used when a snapshot carries no overall sentiment score.
pub const NEUTRAL_SENTIMENT_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub has_data: bool,
    #[serde(default)]
    pub has_today_analysis: Option<bool>,
    #[serde(default)]
    pub is_today: bool,
    /// Explanation supplied alongside `has_data: false`.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub analysis_date: Option<String>,
    #[serde(default)]
    pub analysis_period: Option<AnalysisPeriod>,
    #[serde(default)]
    pub statistics: Option<Statistics>,
    #[serde(default, deserialize_with = "empty_object_as_none")]
    pub crisis_alert: Option<CrisisAlert>,
    #[serde(default, deserialize_with = "empty_object_as_none")]
    pub negative_spike: Option<NegativeSpike>,
    #[serde(default)]
    pub fake_news_details: Vec<FakeNewsDetail>,
    #[serde(default)]
    pub graph_data: GraphData,
    #[serde(default)]
    pub sentiment_by_day: Vec<DailySentiment>,
    #[serde(default)]
    pub sentiment_by_topic: BTreeMap<String, SentimentCounts>,
    #[serde(default)]
    pub sentiment_by_source: BTreeMap<String, SentimentCounts>,
    #[serde(default)]
    pub all_verified_news: Vec<VerifiedNews>,
    #[serde(default)]
    pub past_reports: Vec<PastReport>,
    #[serde(default)]
    pub competitor_analysis: Vec<CompetitorSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub overall_sentiment_score: Option<f64>,
    pub sentiment_breakdown: SentimentCounts,
    pub mentions_today: u64,
    pub mentions_week: u64,
    pub total_news: u64,
    pub real_count: u64,
    pub fake_count: u64,
    pub uncertain_count: u64,
    pub reliability_score: f64,
    pub avg_confidence: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentCounts {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl SentimentCounts {
    /// Sum of the three counts, saturating at `u64::MAX`.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.positive
            .saturating_add(self.neutral)
            .saturating_add(self.negative)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrisisAlert {
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub mentions_today: u64,
    pub negative_today: u64,
    pub positive_today: u64,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegativeSpike {
    pub detected: bool,
    /// Human-readable increase, e.g. `"+75%"`.
    pub increase: String,
    pub from: u64,
    pub to: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakeNewsDetail {
    pub title: String,
    pub reasoning: String,
    pub source: String,
    pub date: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphData {
    pub sentiment_distribution: Vec<DistributionEntry>,
    pub verdict_distribution: Vec<DistributionEntry>,
    pub negative_by_date: Vec<DateCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionEntry {
    pub name: String,
    pub value: f64,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateCount {
    pub date: String,
    pub count: u64,
}

/// Per-day sentiment counts; missing counts read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailySentiment {
    pub date: Option<String>,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    #[serde(other)]
    Neutral,
}

/// Fact-check classification. The analytics service's `UNCERTAIN` (and any
/// other unknown value) reads as `Unverified`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Real,
    Fake,
    #[default]
    #[serde(other)]
    Unverified,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Verification {
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifiedNews {
    pub title: String,
    pub summary: String,
    pub sentiment: SentimentLabel,
    pub category: String,
    pub date: String,
    pub verification: Option<Verification>,
}

impl VerifiedNews {
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.verification
            .as_ref()
            .map_or(Verdict::Unverified, |v| v.verdict)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PastReport {
    pub timestamp: String,
    pub date: String,
    pub crisis_level: RiskLevel,
    pub analysis_period: AnalysisPeriod,
    pub total_news: u64,
    pub sentiment_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitorSummary {
    pub name: String,
    pub total_news: u64,
    pub sentiment_score: f64,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    pub crisis_level: RiskLevel,
    pub error: Option<String>,
}

impl AnalyticsSnapshot {
    /// Placeholder returned when a company has no captured analysis yet.
    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            has_data: false,
            has_today_analysis: Some(false),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Overall sentiment for the gauge, falling back to the neutral midpoint
    /// when the snapshot carries none.
    #[must_use]
    pub fn overall_sentiment_score(&self) -> f64 {
        self.statistics
            .as_ref()
            .and_then(|s| s.overall_sentiment_score)
            .unwrap_or(NEUTRAL_SENTIMENT_SCORE)
    }

    #[must_use]
    pub fn sentiment_breakdown(&self) -> SentimentCounts {
        self.statistics
            .as_ref()
            .map(|s| s.sentiment_breakdown)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn negative_spike_detected(&self) -> bool {
        self.negative_spike.as_ref().is_some_and(|s| s.detected)
    }

    /// Sources ordered by mention volume (ties by name), truncated to `limit`.
    #[must_use]
    pub fn top_sources(&self, limit: usize) -> Vec<(&str, SentimentCounts)> {
        let mut sources: Vec<(&str, SentimentCounts)> = self
            .sentiment_by_source
            .iter()
            .map(|(name, counts)| (name.as_str(), *counts))
            .collect();
        sources.sort_by(|a, b| b.1.total().cmp(&a.1.total()).then(a.0.cmp(b.0)));
        sources.truncate(limit);
        sources
    }

    /// Clamps every score to its declared range and orders `past_reports`
    /// newest first with duplicate timestamps removed.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if let Some(stats) = self.statistics.as_mut() {
            stats.overall_sentiment_score = stats
                .overall_sentiment_score
                .map(|s| clamp_score(s, 100.0));
            stats.reliability_score = clamp_score(stats.reliability_score, 100.0);
            stats.avg_confidence = clamp_score(stats.avg_confidence, 1.0);
        }
        if let Some(alert) = self.crisis_alert.as_mut() {
            alert.risk_score = clamp_score(alert.risk_score, 100.0);
        }
        for fake in &mut self.fake_news_details {
            fake.confidence = clamp_score(fake.confidence, 1.0);
        }
        for report in &mut self.past_reports {
            report.sentiment_score = clamp_score(report.sentiment_score, 100.0);
        }
        for competitor in &mut self.competitor_analysis {
            competitor.sentiment_score = clamp_score(competitor.sentiment_score, 100.0);
        }

        self.past_reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.past_reports.dedup_by(|a, b| a.timestamp == b.timestamp);
        self
    }
}

/// Clamps `value` into `[0, max]`; non-finite input collapses to 0.
#[must_use]
pub fn clamp_score(value: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    }
}

/// Treats `null` and `{}` as an absent group.
fn empty_object_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
        Some(other) => serde_json::from_value(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
