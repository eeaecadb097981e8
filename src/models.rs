//! Core data models for Fishlinic
//!
//! These models are shared by the scorer, the HTTP service, the batch
//! ingester and the reporters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Valid pH range. Readings outside are clamped (or rejected, per policy).
pub const PH_DOMAIN: (f64, f64) = (0.0, 14.0);

/// Valid dissolved-oxygen range in mg/L.
pub const DO_DOMAIN: (f64, f64) = (0.0, 30.0);

/// Water-quality status categories, ordered from healthy to critical
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Good,
    Average,
    Alert,
}

impl Status {
    pub fn all() -> [Status; 3] {
        [Status::Good, Status::Average, Status::Alert]
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Good => write!(f, "good"),
            Status::Average => write!(f, "average"),
            Status::Alert => write!(f, "alert"),
        }
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "good" => Ok(Status::Good),
            "average" => Ok(Status::Average),
            "alert" => Ok(Status::Alert),
            _ => Err(anyhow::anyhow!(
                "Unknown status '{}'. Valid statuses: good, average, alert",
                s
            )),
        }
    }
}

/// The three measured water parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "pH")]
    Ph,
    #[serde(rename = "temp_c")]
    Temperature,
    #[serde(rename = "do_mg_l")]
    DissolvedOxygen,
}

impl Metric {
    pub fn all() -> [Metric; 3] {
        [Metric::Ph, Metric::Temperature, Metric::DissolvedOxygen]
    }

    /// Wire name used by the telemetry feed and the HTTP API
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Ph => "pH",
            Metric::Temperature => "temp_c",
            Metric::DissolvedOxygen => "do_mg_l",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Ph => "pH",
            Metric::Temperature => "Temperature",
            Metric::DissolvedOxygen => "Dissolved oxygen",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Ph => "",
            Metric::Temperature => "°C",
            Metric::DissolvedOxygen => "mg/L",
        }
    }

    /// Physical domain, if the metric has one. Temperature is unbounded.
    pub fn domain(&self) -> Option<(f64, f64)> {
        match self {
            Metric::Ph => Some(PH_DOMAIN),
            Metric::Temperature => None,
            Metric::DissolvedOxygen => Some(DO_DOMAIN),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One water sample: pH, temperature in °C and dissolved oxygen in mg/L
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "pH")]
    pub ph: f64,
    pub temp_c: f64,
    pub do_mg_l: f64,
}

impl Reading {
    pub const fn new(ph: f64, temp_c: f64, do_mg_l: f64) -> Self {
        Self { ph, temp_c, do_mg_l }
    }

    /// Value of a single metric
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Ph => self.ph,
            Metric::Temperature => self.temp_c,
            Metric::DissolvedOxygen => self.do_mg_l,
        }
    }

    /// Copy with pH and dissolved oxygen clamped to their physical domains
    pub fn clamped(&self) -> Self {
        Self {
            ph: self.ph.clamp(PH_DOMAIN.0, PH_DOMAIN.1),
            temp_c: self.temp_c,
            do_mg_l: self.do_mg_l.clamp(DO_DOMAIN.0, DO_DOMAIN.1),
        }
    }

    /// Metrics whose value lies outside the physical domain
    pub fn out_of_domain(&self) -> Vec<Metric> {
        Metric::all()
            .into_iter()
            .filter(|m| match m.domain() {
                Some((lo, hi)) => {
                    let v = self.value(*m);
                    v < lo || v > hi
                }
                None => false,
            })
            .collect()
    }
}

/// Result of evaluating a reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Quality score in [1.0, 10.0], one decimal place
    #[serde(rename = "quality_ai")]
    pub score: f64,
    #[serde(rename = "status_ai")]
    pub status: Status,
}

/// One record of the tank telemetry feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "pH", alias = "ph", alias = "PH")]
    pub ph: f64,
    #[serde(alias = "temp", alias = "temperature")]
    pub temp_c: f64,
    #[serde(alias = "do", alias = "DO", alias = "dox")]
    pub do_mg_l: f64,
    /// Fish-health percentage reported by the feed, clamped to [0, 100].
    /// Not used in scoring.
    #[serde(
        default,
        alias = "health",
        deserialize_with = "deserialize_fish_health",
        skip_serializing_if = "Option::is_none"
    )]
    pub fish_health: Option<f64>,
}

fn deserialize_fish_health<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|v| v.clamp(0.0, 100.0)))
}

impl TelemetryRecord {
    pub fn reading(&self) -> Reading {
        Reading::new(self.ph, self.temp_c, self.do_mg_l)
    }
}

/// Count of assessments by status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub good: usize,
    pub average: usize,
    pub alert: usize,
    pub total: usize,
}

impl StatusSummary {
    pub fn from_assessments<'a>(assessments: impl IntoIterator<Item = &'a Assessment>) -> Self {
        let mut summary = Self::default();
        for a in assessments {
            match a.status {
                Status::Good => summary.good += 1,
                Status::Average => summary.average += 1,
                Status::Alert => summary.alert += 1,
            }
            summary.total += 1;
        }
        summary
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Good => self.good,
            Status::Average => self.average,
            Status::Alert => self.alert,
        }
    }

    /// Number of assessments at or above the given status
    pub fn at_least(&self, status: Status) -> usize {
        Status::all()
            .into_iter()
            .filter(|s| *s >= status)
            .map(|s| self.count(s))
            .sum()
    }
}
