//! Horizontal bars scaled against the largest value.

use newsdash_core::DateCount;
use serde::Serialize;

use crate::non_negative;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Width as a fraction of the track, in `[0, 1]`.
    pub width_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub max_value: f64,
    pub bars: Vec<Bar>,
}

impl BarChart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Builds one bar per item. A zero maximum gives every bar zero width.
#[must_use]
pub fn bar<T>(items: &[T], label: impl Fn(&T) -> String, key: impl Fn(&T) -> f64) -> BarChart {
    let values: Vec<f64> = items.iter().map(|item| non_negative(key(item))).collect();
    let max_value = values.iter().copied().fold(0.0_f64, f64::max);

    let bars = items
        .iter()
        .zip(values)
        .map(|(item, value)| Bar {
            label: label(item),
            value,
            width_fraction: if max_value > 0.0 {
                value / max_value
            } else {
                0.0
            },
        })
        .collect();

    BarChart { max_value, bars }
}

/// Negative mentions per date.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn negative_by_date(entries: &[DateCount]) -> BarChart {
    bar(entries, |e| e.date.clone(), |e| e.count as f64)
}
