//! Predictor seam used by the HTTP service and the CLI
//!
//! A predictor turns a raw reading into an assessment. The heuristic
//! predictor is the only implementation; a trained model can be slotted in
//! behind the same trait without touching the callers.

use super::{quality_scorer, ScoringError, ScoringResult};
use crate::models::{Assessment, Metric, Reading};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// How out-of-domain pH and dissolved-oxygen values are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Silently clamp to the nearest domain boundary (default)
    #[default]
    Clamp,
    /// Refuse the reading with `ScoringError::OutOfDomain`
    Reject,
}

impl FromStr for InputPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clamp" => Ok(InputPolicy::Clamp),
            "reject" => Ok(InputPolicy::Reject),
            _ => Err(anyhow::anyhow!(
                "Unknown input policy '{}'. Valid policies: clamp, reject",
                s
            )),
        }
    }
}

impl std::fmt::Display for InputPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputPolicy::Clamp => write!(f, "clamp"),
            InputPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl InputPolicy {
    /// Turn a raw reading into the reading that gets scored
    pub fn apply(&self, reading: Reading) -> ScoringResult<Reading> {
        for metric in Metric::all() {
            let value = reading.value(metric);
            if !value.is_finite() {
                return Err(ScoringError::NonFinite { metric, value });
            }
        }

        let outside = reading.out_of_domain();
        if outside.is_empty() {
            return Ok(reading);
        }

        match self {
            InputPolicy::Clamp => {
                let clamped = reading.clamped();
                for metric in &outside {
                    warn!(
                        "{} = {} outside valid range, clamped to {}",
                        metric,
                        reading.value(*metric),
                        clamped.value(*metric)
                    );
                }
                Ok(clamped)
            }
            InputPolicy::Reject => {
                let metric = outside[0];
                let (min, max) = metric.domain().unwrap_or((f64::MIN, f64::MAX));
                Err(ScoringError::OutOfDomain {
                    metric,
                    value: reading.value(metric),
                    min,
                    max,
                })
            }
        }
    }
}

/// Anything that can assess a reading
pub trait Predictor: Send + Sync {
    fn predict(&self, reading: Reading) -> ScoringResult<Assessment>;

    /// Short identifier, reported in logs
    fn name(&self) -> &str;
}

/// Threshold and weighted-formula predictor
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPredictor {
    policy: InputPolicy,
}

impl HeuristicPredictor {
    pub fn new(policy: InputPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    /// Full breakdown for a reading, after the input policy is applied
    pub fn breakdown(&self, reading: Reading) -> ScoringResult<quality_scorer::ScoreBreakdown> {
        let reading = self.policy.apply(reading)?;
        Ok(quality_scorer::score_breakdown(&reading))
    }
}

impl Predictor for HeuristicPredictor {
    fn predict(&self, reading: Reading) -> ScoringResult<Assessment> {
        let r = self.policy.apply(reading)?;
        Ok(Assessment {
            score: quality_scorer::score(r.ph, r.temp_c, r.do_mg_l),
            status: quality_scorer::classify(r.ph, r.temp_c, r.do_mg_l),
        })
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
