//! Batch telemetry ingestion
//!
//! Reads the tank telemetry feed, either as JSON Lines (one record per line)
//! or as a single JSON array, and assesses every record.

use crate::models::{Assessment, StatusSummary, TelemetryRecord};
use crate::scoring::Predictor;
use serde::Serialize;
use std::io::Read;
use thiserror::Error;
use tracing::{debug, info};

/// Errors reading a telemetry stream
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: invalid telemetry record: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse telemetry records from a JSON array or JSON Lines text
pub fn parse_records(input: &str) -> Result<Vec<TelemetryRecord>, TelemetryError> {
    if input.trim_start().starts_with('[') {
        return serde_json::from_str(input).map_err(|source| TelemetryError::Parse {
            line: source.line(),
            source,
        });
    }

    let mut records = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|source| TelemetryError::Parse {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    debug!("Parsed {} telemetry records", records.len());
    Ok(records)
}

/// Read and parse records from any reader (file or stdin)
pub fn read_records<R: Read>(mut reader: R) -> Result<Vec<TelemetryRecord>, TelemetryError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_records(&content)
}

/// One assessed telemetry record
#[derive(Debug, Clone, Serialize)]
pub struct AssessedRecord {
    /// 1-based position in the input
    pub index: usize,
    pub record: TelemetryRecord,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Assessed(Assessment),
    Rejected { error: String },
}

impl AssessedRecord {
    pub fn assessment(&self) -> Option<&Assessment> {
        match &self.outcome {
            Outcome::Assessed(a) => Some(a),
            Outcome::Rejected { .. } => None,
        }
    }
}

/// Assessments for a whole telemetry stream
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub predictor: String,
    pub records: Vec<AssessedRecord>,
    pub summary: StatusSummary,
    pub rejected: usize,
    pub min_score: Option<f64>,
    pub mean_score: Option<f64>,
}

impl BatchReport {
    /// Assess every record with the given predictor
    pub fn build(predictor: &dyn Predictor, records: Vec<TelemetryRecord>) -> Self {
        let assessed: Vec<AssessedRecord> = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let outcome = match predictor.predict(record.reading()) {
                    Ok(a) => Outcome::Assessed(a),
                    Err(e) => Outcome::Rejected {
                        error: e.to_string(),
                    },
                };
                AssessedRecord {
                    index: i + 1,
                    record,
                    outcome,
                }
            })
            .collect();

        let scored: Vec<&Assessment> = assessed.iter().filter_map(|r| r.assessment()).collect();
        let summary = StatusSummary::from_assessments(scored.iter().copied());
        let rejected = assessed.len() - scored.len();
        let min_score = scored.iter().map(|a| a.score).reduce(f64::min);
        let mean_score = if scored.is_empty() {
            None
        } else {
            Some(scored.iter().map(|a| a.score).sum::<f64>() / scored.len() as f64)
        };

        info!(
            "Assessed {} records: {} good, {} average, {} alert, {} rejected",
            assessed.len(),
            summary.good,
            summary.average,
            summary.alert,
            rejected
        );

        Self {
            predictor: predictor.name().to_string(),
            records: assessed,
            summary,
            rejected,
            min_score,
            mean_score,
        }
    }
}
