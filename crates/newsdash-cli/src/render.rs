//! Plain-text rendering of a [`ViewState`].

use newsdash_charts::{plotted_days, BarChart, ColorBand, PieChart};
use newsdash_dashboard::{ViewMode, ViewState};

const BAR_WIDTH: usize = 30;

pub(crate) fn render_view(view: &ViewState) -> String {
    let mut lines = Vec::new();

    let Some(snapshot) = view.snapshot.as_deref() else {
        lines.push("no snapshot loaded".to_string());
        return finish(lines);
    };

    let mode = match view.mode {
        ViewMode::Live => "LIVE".to_string(),
        ViewMode::Historical => format!(
            "HISTORICAL {}",
            view.selected_timestamp.as_deref().unwrap_or("-")
        ),
    };
    lines.push(format!("{} [{mode}]", snapshot.company_name));
    if let Some(headline) = view.headline() {
        lines.push(headline.to_string());
    }
    if let Some(date) = &snapshot.analysis_date {
        lines.push(format!("Analyzed: {date}"));
    }
    if let Some(err) = &view.error {
        lines.push(format!("error: {err}"));
    }

    if !snapshot.has_data {
        lines.push(
            snapshot
                .message
                .clone()
                .unwrap_or_else(|| "no analysis yet; run `newsdash analyze` first".to_string()),
        );
        lines.push(format!("[{}]", view.analyze_button_label()));
        return finish(lines);
    }

    let Some(charts) = view.charts() else {
        return finish(lines);
    };

    lines.push(String::new());
    lines.push(format!(
        "Sentiment score: {:.0}/100 ({})  {}",
        charts.gauge.score,
        band_label(charts.gauge.band),
        meter(charts.gauge.score / 100.0)
    ));

    if let Some(alert) = &snapshot.crisis_alert {
        lines.push(format!(
            "Crisis risk: {} ({:.0}) - {}",
            alert.risk_level, alert.risk_score, alert.message
        ));
    }
    if snapshot.negative_spike_detected() {
        if let Some(spike) = &snapshot.negative_spike {
            lines.push(format!(
                "Negative spike: {} ({} -> {})",
                spike.increase, spike.from, spike.to
            ));
        }
    }

    push_pie(&mut lines, "Sentiment", &charts.sentiment_pie);
    push_pie(&mut lines, "Verification", &charts.verdict_pie);

    if !charts.trend.is_empty() {
        lines.push(String::new());
        lines.push(format!("{:<8}{:>8}{:>8}{:>8}", "DAY", "POS", "NEU", "NEG"));
        let days = plotted_days(&snapshot.sentiment_by_day);
        for (label, day) in charts.trend.x_labels.iter().zip(days) {
            lines.push(format!(
                "{:<8}{:>8}{:>8}{:>8}",
                label.text, day.positive, day.neutral, day.negative
            ));
        }
    }

    push_bars(&mut lines, "Negative mentions by date", &charts.negative_by_date);
    push_bars(&mut lines, "Negative mentions by topic", &charts.topics);
    push_bars(&mut lines, "Top sources by volume", &charts.sources);

    if !snapshot.fake_news_details.is_empty() {
        lines.push(String::new());
        lines.push("Flagged as fake:".to_string());
        for detail in &snapshot.fake_news_details {
            lines.push(format!(
                "  {} ({}, {}, {:.0}% confidence)",
                detail.title,
                detail.source,
                detail.date,
                detail.confidence * 100.0
            ));
        }
    }

    if !snapshot.competitor_analysis.is_empty() {
        lines.push(String::new());
        lines.push(format!("{:<25}{:>8}{:>8}  RISK", "COMPETITOR", "NEWS", "SCORE"));
        for competitor in &snapshot.competitor_analysis {
            lines.push(format!(
                "{:<25}{:>8}{:>8.0}  {}",
                competitor.name,
                competitor.total_news,
                competitor.sentiment_score,
                competitor.crisis_level
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("[{}]", view.analyze_button_label()));
    finish(lines)
}

pub(crate) fn render_past_reports(view: &ViewState) -> String {
    let rows = view.past_reports();
    if rows.is_empty() {
        return "no past reports found; run `newsdash analyze` first\n".to_string();
    }

    let mut lines = vec![format!(
        "  {:<28}{:<14}{:<8}{:<12}{:>8}{:>8}",
        "TIMESTAMP", "DATE", "RISK", "PERIOD", "NEWS", "SCORE"
    )];
    for row in rows {
        lines.push(format!(
            "{} {:<28}{:<14}{:<8}{:<12}{:>8}{:>8.0}",
            if row.selected { '*' } else { ' ' },
            row.timestamp,
            row.date,
            row.crisis_level,
            row.period_label,
            row.total_news,
            row.sentiment_score
        ));
    }
    finish(lines)
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn band_label(band: ColorBand) -> &'static str {
    match band {
        ColorBand::Good => "good",
        ColorBand::Warn => "mixed",
        ColorBand::Bad => "poor",
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn meter(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn push_pie(lines: &mut Vec<String>, title: &str, chart: &PieChart) {
    if chart.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{title}:"));
    for slice in &chart.slices {
        lines.push(format!(
            "  {:<14}{:>4}%  {}",
            slice.name,
            slice.percentage,
            meter(f64::from(slice.percentage) / 100.0)
        ));
    }
}

fn push_bars(lines: &mut Vec<String>, title: &str, chart: &BarChart) {
    if chart.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{title}:"));
    for bar in &chart.bars {
        lines.push(format!(
            "  {:<22}{:>6.0}  {}",
            bar.label,
            bar.value,
            meter(bar.width_fraction)
        ));
    }
}
