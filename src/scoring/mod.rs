//! Water Quality Scoring
//!
//! Converts a single reading (pH, temperature, dissolved oxygen) into a
//! 1-10 quality score and a good/average/alert status.
//!
//! # Scoring Formula
//!
//! ```text
//! Weighted = pH × 0.28 + Temperature × 0.24 + Oxygen × 0.30 + Baseline × 0.18
//! Score    = clamp(round((Weighted × 9 + 1) × 10) / 10, 1.0, 10.0)
//!
//! Where each sub-score is in [0, 1]:
//!   pH          = 1.0 inside [6.5, 8.0], else max(0, 1 - |pH - 7.25| / 1.5)
//!   Temperature = 1.0 inside [20, 30],   else max(0, 1 - |T - 25| / 6)
//!   Oxygen      = max(0, 1 - |DO - 7| / gap), gap = 4 below 7 mg/L, 8 above
//!   Baseline    = 0.8 (fixed)
//! ```
//!
//! # Status Bands
//!
//! | Metric      | Alert            | Average          |
//! |-------------|------------------|------------------|
//! | pH          | < 6.0 or > 8.5   | < 6.5 or > 8.0   |
//! | Temperature | < 18 or > 32 °C  | < 20 or > 30 °C  |
//! | Oxygen      | < 3.5 mg/L       | < 5.0 mg/L       |
//!
//! Alert takes precedence over average; anything else is good.
//!
//! # Example
//!
//! pH 7.0, 25 °C, 7.0 mg/L puts every measured sub-score at 1.0:
//!
//! Weighted = 0.28 + 0.24 + 0.30 + 0.8 × 0.18 = 0.964
//! Score    = round(9.676 × 10) / 10 = 9.7

mod predictor;
mod quality_scorer;

pub use predictor::{HeuristicPredictor, InputPolicy, Predictor};
pub use quality_scorer::{
    classify, explain, metric_status, score, score_breakdown, sub_scores, ScoreBreakdown,
    SubScores, BASELINE_SUB_SCORE,
};

use crate::models::Metric;
use thiserror::Error;

/// Errors raised when a reading cannot be scored
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("{metric} must be a finite number, got {value}")]
    NonFinite { metric: Metric, value: f64 },

    #[error("{metric} = {value} is outside the valid range {min}-{max}")]
    OutOfDomain {
        metric: Metric,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type ScoringResult<T> = Result<T, ScoringError>;
