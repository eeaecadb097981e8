//! JSON reporter
//!
//! Single readings use the same `{quality_ai, status_ai}` shape as the HTTP
//! API, optionally with the full breakdown attached.

use crate::models::Assessment;
use crate::scoring::ScoreBreakdown;
use crate::telemetry::BatchReport;
use anyhow::Result;

/// Render a scored reading as JSON
pub fn render_assessment(breakdown: &ScoreBreakdown, explain: bool) -> Result<String> {
    let assessment = Assessment {
        score: breakdown.score,
        status: breakdown.status,
    };
    let mut value = serde_json::to_value(assessment)?;
    if explain {
        value["breakdown"] = serde_json::to_value(breakdown)?;
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Render a batch report as JSON
pub fn render_batch(report: &BatchReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
