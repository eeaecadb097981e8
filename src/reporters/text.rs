//! Text (terminal) reporter with colors and formatting

use crate::models::Status;
use crate::scoring::{explain, ScoreBreakdown};
use crate::telemetry::{BatchReport, Outcome};
use anyhow::Result;
use console::style;

fn styled_status(status: Status) -> String {
    match status {
        Status::Good => style(status).green().bold().to_string(),
        Status::Average => style(status).yellow().bold().to_string(),
        Status::Alert => style(status).red().bold().to_string(),
    }
}

/// Render a scored reading for the terminal
pub fn render_assessment(breakdown: &ScoreBreakdown, with_explain: bool) -> Result<String> {
    let mut out = String::new();
    let r = &breakdown.reading;

    out.push_str(&format!("\n{}\n", style("Fishlinic Water Quality").bold()));
    out.push_str(&format!(
        "{}\n",
        style("──────────────────────────────────────").dim()
    ));
    out.push_str(&format!(
        "Score: {}  Status: {}\n",
        style(format!("{:.1}/10", breakdown.score)).bold(),
        styled_status(breakdown.status)
    ));
    out.push_str(&format!(
        "pH: {:.2}  Temp: {:.1} °C  DO: {:.2} mg/L\n",
        r.ph, r.temp_c, r.do_mg_l
    ));

    if with_explain {
        out.push('\n');
        out.push_str(&explain(breakdown));
        out.push('\n');
    }

    Ok(out)
}

/// Render a batch report as a table plus summary
pub fn render_batch(report: &BatchReport) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{} ({} records)\n",
        style("Fishlinic Telemetry Batch").bold(),
        report.records.len()
    ));
    out.push_str(&format!(
        "{}\n",
        style("──────────────────────────────────────").dim()
    ));
    out.push_str(&format!(
        "{:>5}  {:<20}  {:>6}  {:>6}  {:>6}  {:>5}  {}\n",
        "#", "timestamp", "pH", "temp", "DO", "score", "status"
    ));

    for rec in &report.records {
        let ts = rec
            .record
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        let (score, status) = match &rec.outcome {
            Outcome::Assessed(a) => (format!("{:.1}", a.score), styled_status(a.status)),
            Outcome::Rejected { error } => (
                "-".to_string(),
                style(format!("rejected: {error}")).dim().to_string(),
            ),
        };
        out.push_str(&format!(
            "{:>5}  {:<20}  {:>6.2}  {:>6.1}  {:>6.2}  {:>5}  {}\n",
            rec.index, ts, rec.record.ph, rec.record.temp_c, rec.record.do_mg_l, score, status
        ));
    }

    let s = &report.summary;
    out.push_str(&format!("\n{}\n", style("SUMMARY").bold()));
    out.push_str(&format!(
        "  {} good  {} average  {} alert",
        s.good, s.average, s.alert
    ));
    if report.rejected > 0 {
        out.push_str(&format!("  {} rejected", report.rejected));
    }
    out.push('\n');
    if let (Some(min), Some(mean)) = (report.min_score, report.mean_score) {
        out.push_str(&format!("  Score: min {:.1}  mean {:.2}\n", min, mean));
    }

    Ok(out)
}
