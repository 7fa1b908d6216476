use newsdash_core::{AnalyticsSnapshot, DistributionEntry, SentimentCounts};
use serde::Serialize;

use crate::bar::{bar, negative_by_date, BarChart};
use crate::gauge::{gauge, Gauge};
use crate::line::{line, LineChart};
use crate::pie::{pie, PieChart};

/// Sources shown in the source breakdown, ranked by mention volume.
pub const TOP_SOURCES: usize = 5;

/// Every chart on the dashboard, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub gauge: Gauge,
    pub sentiment_pie: PieChart,
    pub verdict_pie: PieChart,
    pub trend: LineChart,
    pub negative_by_date: BarChart,
    pub topics: BarChart,
    pub sources: BarChart,
}

impl DashboardCharts {
    /// Projects a snapshot onto chart geometry.
    ///
    /// Works for any snapshot, including `has_data: false` ones, which yield
    /// a neutral gauge and empty charts. When the service omits the sentiment
    /// distribution it is derived from the statistics breakdown.
    #[must_use]
    pub fn project(snapshot: &AnalyticsSnapshot) -> Self {
        let graph = &snapshot.graph_data;

        let sentiment_pie = if graph.sentiment_distribution.is_empty() {
            pie(&breakdown_distribution(snapshot.sentiment_breakdown()))
        } else {
            pie(&graph.sentiment_distribution)
        };

        let topics: Vec<(&str, SentimentCounts)> = snapshot
            .sentiment_by_topic
            .iter()
            .map(|(name, counts)| (name.as_str(), *counts))
            .collect();

        Self {
            gauge: gauge(snapshot.overall_sentiment_score()),
            sentiment_pie,
            verdict_pie: pie(&graph.verdict_distribution),
            trend: line(&snapshot.sentiment_by_day),
            negative_by_date: negative_by_date(&graph.negative_by_date),
            topics: volume_bars(&topics),
            sources: volume_bars(&snapshot.top_sources(TOP_SOURCES)),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn volume_bars(rows: &[(&str, SentimentCounts)]) -> BarChart {
    bar(rows, |(name, _)| (*name).to_string(), |(_, c)| c.total() as f64)
}

#[allow(clippy::cast_precision_loss)]
fn breakdown_distribution(counts: SentimentCounts) -> Vec<DistributionEntry> {
    [
        ("Positive", counts.positive, "#10B981"),
        ("Neutral", counts.neutral, "#6B7280"),
        ("Negative", counts.negative, "#EF4444"),
    ]
    .into_iter()
    .map(|(name, value, color)| DistributionEntry {
        name: name.to_string(),
        value: value as f64,
        color: Some(color.to_string()),
    })
    .collect()
}
