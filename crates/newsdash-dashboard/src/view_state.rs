use std::sync::Arc;

use newsdash_charts::DashboardCharts;
use newsdash_core::{AnalysisPeriod, AnalyticsSnapshot, RiskLevel};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Live,
    Historical,
}

/// Everything the dashboard renders, owned by one controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub mode: ViewMode,
    /// Set exactly when `mode` is [`ViewMode::Historical`].
    pub selected_timestamp: Option<String>,
    pub period: AnalysisPeriod,
    pub is_fetching: bool,
    pub error: Option<String>,
    pub period_picker_open: bool,
    /// The session was rejected; the UI should send the user to log in.
    pub login_required: bool,
    /// Last successfully loaded snapshot. Survives failed loads.
    pub snapshot: Option<Arc<AnalyticsSnapshot>>,
}

/// One line of the past-reports picker.
#[derive(Debug, Clone, PartialEq)]
pub struct PastReportRow {
    pub timestamp: String,
    pub date: String,
    pub crisis_level: RiskLevel,
    pub period_label: &'static str,
    pub total_news: u64,
    pub sentiment_score: f64,
    pub selected: bool,
}

impl ViewState {
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.mode == ViewMode::Live
    }

    #[must_use]
    pub fn analyze_button_label(&self) -> &'static str {
        if self.is_fetching {
            "Analyzing..."
        } else if self.is_live()
            && self
                .snapshot
                .as_ref()
                .and_then(|s| s.has_today_analysis)
                .unwrap_or(false)
        {
            "Re-analyze"
        } else {
            "Analyze Now"
        }
    }

    /// Badge over the results, shown only when the loaded snapshot reports
    /// the period it was analyzed over. The pending selection never feeds it.
    #[must_use]
    pub fn headline(&self) -> Option<&'static str> {
        self.snapshot
            .as_ref()
            .and_then(|s| s.analysis_period)
            .map(AnalysisPeriod::headline)
    }

    #[must_use]
    pub fn charts(&self) -> Option<DashboardCharts> {
        self.snapshot
            .as_deref()
            .map(DashboardCharts::project)
    }

    /// Past reports from the current snapshot, newest first, with the
    /// selected one flagged.
    #[must_use]
    pub fn past_reports(&self) -> Vec<PastReportRow> {
        let Some(snapshot) = &self.snapshot else {
            return Vec::new();
        };
        snapshot
            .past_reports
            .iter()
            .map(|report| PastReportRow {
                timestamp: report.timestamp.clone(),
                date: report.date.clone(),
                crisis_level: report.crisis_level,
                period_label: report.analysis_period.label(),
                total_news: report.total_news,
                sentiment_score: report.sentiment_score,
                selected: self.selected_timestamp.as_deref() == Some(report.timestamp.as_str()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(today: bool) -> Arc<AnalyticsSnapshot> {
        Arc::new(AnalyticsSnapshot {
            has_data: true,
            has_today_analysis: Some(today),
            ..AnalyticsSnapshot::default()
        })
    }

    #[test]
    fn button_label_while_fetching() {
        let view = ViewState {
            is_fetching: true,
            snapshot: Some(snapshot(true)),
            ..ViewState::default()
        };
        assert_eq!(view.analyze_button_label(), "Analyzing...");
    }

    #[test]
    fn button_label_reanalyze_only_in_live_mode() {
        let mut view = ViewState {
            snapshot: Some(snapshot(true)),
            ..ViewState::default()
        };
        assert_eq!(view.analyze_button_label(), "Re-analyze");

        view.mode = ViewMode::Historical;
        view.selected_timestamp = Some("t".to_string());
        assert_eq!(view.analyze_button_label(), "Analyze Now");
    }

    #[test]
    fn button_label_without_today_analysis() {
        let view = ViewState {
            snapshot: Some(snapshot(false)),
            ..ViewState::default()
        };
        assert_eq!(view.analyze_button_label(), "Analyze Now");
        assert_eq!(ViewState::default().analyze_button_label(), "Analyze Now");
    }

    #[test]
    fn headline_comes_from_snapshot_only() {
        let mut view = ViewState {
            period: AnalysisPeriod::Year,
            ..ViewState::default()
        };
        assert_eq!(view.headline(), None);

        view.snapshot = Some(snapshot(true));
        assert_eq!(view.headline(), None);

        view.snapshot = Some(Arc::new(AnalyticsSnapshot {
            analysis_period: Some(AnalysisPeriod::Week),
            ..AnalyticsSnapshot::default()
        }));
        assert_eq!(view.headline(), Some("This Week's Analysis"));
    }

    #[test]
    fn past_reports_flag_selection() {
        let snapshot: AnalyticsSnapshot = serde_json::from_value(serde_json::json!({
            "has_data": true,
            "past_reports": [
                {"timestamp": "t2", "date": "2025-01-02", "crisis_level": "HIGH", "analysis_period": "week"},
                {"timestamp": "t1", "date": "2025-01-01"}
            ]
        }))
        .unwrap();
        let view = ViewState {
            mode: ViewMode::Historical,
            selected_timestamp: Some("t1".to_string()),
            snapshot: Some(Arc::new(snapshot)),
            ..ViewState::default()
        };

        let rows = view.past_reports();
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].selected);
        assert!(rows[1].selected);
        assert_eq!(rows[0].crisis_level, RiskLevel::High);
        assert_eq!(rows[0].period_label, AnalysisPeriod::Week.label());
    }

    #[test]
    fn charts_absent_without_snapshot() {
        assert!(ViewState::default().charts().is_none());
    }
}
