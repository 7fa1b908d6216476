use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Aggregation window a snapshot summarizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisPeriod {
    #[default]
    Today,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid analysis period '{0}'; expected one of today, week, month, year")]
pub struct InvalidPeriod(pub String);

impl AnalysisPeriod {
    pub const ALL: [AnalysisPeriod; 4] = [
        AnalysisPeriod::Today,
        AnalysisPeriod::Week,
        AnalysisPeriod::Month,
        AnalysisPeriod::Year,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisPeriod::Today => "today",
            AnalysisPeriod::Week => "week",
            AnalysisPeriod::Month => "month",
            AnalysisPeriod::Year => "year",
        }
    }

    /// Short label used on the period picker buttons.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AnalysisPeriod::Today => "Today",
            AnalysisPeriod::Week => "This Week",
            AnalysisPeriod::Month => "This Month",
            AnalysisPeriod::Year => "This Year",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            AnalysisPeriod::Today => "Last 24 hours",
            AnalysisPeriod::Week => "Last 7 days",
            AnalysisPeriod::Month => "Last 30 days",
            AnalysisPeriod::Year => "Last 365 days",
        }
    }

    /// Headline badge shown above a snapshot analyzed over this window.
    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            AnalysisPeriod::Today => "Today's Analysis",
            AnalysisPeriod::Week => "This Week's Analysis",
            AnalysisPeriod::Month => "This Month's Analysis",
            AnalysisPeriod::Year => "This Year's Analysis",
        }
    }
}

impl std::fmt::Display for AnalysisPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisPeriod {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(AnalysisPeriod::Today),
            "week" => Ok(AnalysisPeriod::Week),
            "month" => Ok(AnalysisPeriod::Month),
            "year" => Ok(AnalysisPeriod::Year),
            other => Err(InvalidPeriod(other.to_owned())),
        }
    }
}

/// Pending period choice, held apart from the displayed snapshot.
///
/// Changing the selection never touches what is on screen; only a successful
/// analysis run does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodSelector {
    selected: AnalysisPeriod,
}

impl PeriodSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> AnalysisPeriod {
        self.selected
    }

    pub fn select(&mut self, period: AnalysisPeriod) {
        self.selected = period;
    }

    /// Selects a period from its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPeriod`] and keeps the previous selection when `raw`
    /// is not one of the four known windows.
    pub fn select_str(&mut self, raw: &str) -> Result<AnalysisPeriod, InvalidPeriod> {
        let period = raw.parse::<AnalysisPeriod>()?;
        self.selected = period;
        Ok(period)
    }

    #[must_use]
    pub fn is_selected(&self, period: AnalysisPeriod) -> bool {
        self.selected == period
    }
}
