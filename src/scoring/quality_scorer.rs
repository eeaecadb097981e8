//! Threshold classifier and weighted quality score

use crate::models::{Metric, Reading, Status};
use tracing::debug;

/// Ideal pH band
const PH_GOOD: (f64, f64) = (6.5, 8.0);
const PH_GAP: f64 = 1.5;

/// Ideal temperature band in °C
const TEMP_GOOD: (f64, f64) = (20.0, 30.0);
const TEMP_GAP: f64 = 6.0;

/// Ideal dissolved oxygen in mg/L, with asymmetric tolerance
const DO_IDEAL: f64 = 7.0;
const DO_GAP_BELOW: f64 = 4.0;
const DO_GAP_ABOVE: f64 = 8.0;

/// Fixed stand-in for the fish-health factor
pub const BASELINE_SUB_SCORE: f64 = 0.8;

const PH_WEIGHT: f64 = 0.28;
const TEMP_WEIGHT: f64 = 0.24;
const DO_WEIGHT: f64 = 0.30;
const BASELINE_WEIGHT: f64 = 0.18;

const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;

/// Per-metric sub-scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SubScores {
    pub ph: f64,
    pub temperature: f64,
    pub oxygen: f64,
    pub baseline: f64,
}

impl SubScores {
    /// Weighted blend of the four sub-scores (weights sum to 1.0)
    pub fn weighted(&self) -> f64 {
        self.ph * PH_WEIGHT
            + self.temperature * TEMP_WEIGHT
            + self.oxygen * DO_WEIGHT
            + self.baseline * BASELINE_WEIGHT
    }
}

/// Complete score breakdown for transparency
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoreBreakdown {
    /// The reading that was evaluated (after domain clamping)
    pub reading: Reading,
    pub sub_scores: SubScores,
    pub weighted: f64,
    /// Band status for each metric in isolation
    pub metric_statuses: Vec<(Metric, Status)>,
    pub score: f64,
    pub status: Status,
}

/// Classify a reading into good / average / alert.
///
/// Inputs are expected to be clamped to their domains already.
pub fn classify(ph: f64, temp_c: f64, do_mg_l: f64) -> Status {
    if ph < 6.0 || ph > 8.5 || temp_c < 18.0 || temp_c > 32.0 || do_mg_l < 3.5 {
        return Status::Alert;
    }
    if ph < 6.5 || ph > 8.0 || temp_c < 20.0 || temp_c > 30.0 || do_mg_l < 5.0 {
        return Status::Average;
    }
    Status::Good
}

/// Band status of a single metric
pub fn metric_status(metric: Metric, value: f64) -> Status {
    match metric {
        Metric::Ph => {
            if !(6.0..=8.5).contains(&value) {
                Status::Alert
            } else if !(6.5..=8.0).contains(&value) {
                Status::Average
            } else {
                Status::Good
            }
        }
        Metric::Temperature => {
            if !(18.0..=32.0).contains(&value) {
                Status::Alert
            } else if !(20.0..=30.0).contains(&value) {
                Status::Average
            } else {
                Status::Good
            }
        }
        Metric::DissolvedOxygen => {
            if value < 3.5 {
                Status::Alert
            } else if value < 5.0 {
                Status::Average
            } else {
                Status::Good
            }
        }
    }
}

/// Sub-score for a value with a flat ideal band and a linear fall-off
fn banded_sub_score(value: f64, band: (f64, f64), gap: f64) -> f64 {
    if value >= band.0 && value <= band.1 {
        return 1.0;
    }
    let center = (band.0 + band.1) / 2.0;
    (1.0 - (value - center).abs() / gap).max(0.0)
}

fn oxygen_sub_score(do_mg_l: f64) -> f64 {
    let delta = do_mg_l - DO_IDEAL;
    let gap = if delta < 0.0 { DO_GAP_BELOW } else { DO_GAP_ABOVE };
    (1.0 - delta.abs() / gap).max(0.0)
}

/// Compute all four sub-scores for a reading
pub fn sub_scores(ph: f64, temp_c: f64, do_mg_l: f64) -> SubScores {
    SubScores {
        ph: banded_sub_score(ph, PH_GOOD, PH_GAP),
        temperature: banded_sub_score(temp_c, TEMP_GOOD, TEMP_GAP),
        oxygen: oxygen_sub_score(do_mg_l),
        baseline: BASELINE_SUB_SCORE.clamp(0.0, 1.0),
    }
}

/// Map a weighted blend in [0, 1] onto [1, 10] with one decimal
fn rescale(weighted: f64) -> f64 {
    // Ties round to even
    let rounded = ((weighted * 9.0 + 1.0) * 10.0).round_ties_even() / 10.0;
    rounded.clamp(MIN_SCORE, MAX_SCORE)
}

/// Quality score in [1.0, 10.0], rounded to one decimal place
pub fn score(ph: f64, temp_c: f64, do_mg_l: f64) -> f64 {
    rescale(sub_scores(ph, temp_c, do_mg_l).weighted())
}

/// Score a reading and keep every intermediate value
pub fn score_breakdown(reading: &Reading) -> ScoreBreakdown {
    let subs = sub_scores(reading.ph, reading.temp_c, reading.do_mg_l);
    let weighted = subs.weighted();

    debug!(
        "Sub-scores: pH={:.3}, temp={:.3}, DO={:.3}, baseline={:.2} -> weighted={:.4}",
        subs.ph, subs.temperature, subs.oxygen, subs.baseline, weighted
    );

    ScoreBreakdown {
        reading: *reading,
        sub_scores: subs,
        weighted,
        metric_statuses: Metric::all()
            .into_iter()
            .map(|m| (m, metric_status(m, reading.value(m))))
            .collect(),
        score: rescale(weighted),
        status: classify(reading.ph, reading.temp_c, reading.do_mg_l),
    }
}

/// Generate human-readable explanation of a score
pub fn explain(breakdown: &ScoreBreakdown) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "# Water Quality: {:.1}/10 ({})\n",
        breakdown.score, breakdown.status
    ));

    lines.push("## Scoring Formula\n".to_string());
    lines.push("```".to_string());
    lines.push(format!(
        "Weighted = pH × {PH_WEIGHT} + Temp × {TEMP_WEIGHT} + DO × {DO_WEIGHT} + Baseline × {BASELINE_WEIGHT}"
    ));
    lines.push("Score    = round((Weighted × 9 + 1) × 10) / 10".to_string());
    lines.push("```\n".to_string());

    lines.push("## Sub-scores\n".to_string());
    let s = &breakdown.sub_scores;
    for (metric, status) in &breakdown.metric_statuses {
        let sub = match metric {
            Metric::Ph => s.ph,
            Metric::Temperature => s.temperature,
            Metric::DissolvedOxygen => s.oxygen,
        };
        let unit = metric.unit();
        let unit = if unit.is_empty() {
            String::new()
        } else {
            format!(" {unit}")
        };
        lines.push(format!(
            "- **{}**: {:.2}{} -> {:.2} ({})",
            metric.label(),
            breakdown.reading.value(*metric),
            unit,
            sub,
            status
        ));
    }
    lines.push(format!("- **Baseline**: {:.2} (fixed)", s.baseline));
    lines.push(format!("\nWeighted: {:.4}", breakdown.weighted));

    lines.join("\n")
}
