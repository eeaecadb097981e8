//! Output reporters for Fishlinic assessments
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::scoring::ScoreBreakdown;
use crate::telemetry::BatchReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a single scored reading
pub fn report_assessment(
    breakdown: &ScoreBreakdown,
    format: OutputFormat,
    explain: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_assessment(breakdown, explain),
        OutputFormat::Json => json::render_assessment(breakdown, explain),
    }
}

/// Render a batch of assessed telemetry
pub fn report_batch(report: &BatchReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_batch(report),
        OutputFormat::Json => json::render_batch(report),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Reading, TelemetryRecord};
    use crate::scoring::{score_breakdown, HeuristicPredictor};

    pub(crate) fn test_breakdown() -> ScoreBreakdown {
        score_breakdown(&Reading::new(6.2, 19.0, 4.0))
    }

    pub(crate) fn test_batch() -> BatchReport {
        let records = vec![
            TelemetryRecord {
                timestamp: None,
                ph: 7.0,
                temp_c: 25.0,
                do_mg_l: 7.0,
                fish_health: Some(80.0),
            },
            TelemetryRecord {
                timestamp: None,
                ph: 5.0,
                temp_c: 35.0,
                do_mg_l: 2.0,
                fish_health: None,
            },
        ];
        BatchReport::build(&HeuristicPredictor::default(), records)
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_display_roundtrip() {
        for f in [OutputFormat::Text, OutputFormat::Json] {
            assert_eq!(f.to_string().parse::<OutputFormat>().unwrap(), f);
        }
    }
}
