//! Fishlinic - water quality scoring
//!
//! Turns tank sensor readings (pH, temperature, dissolved oxygen) into a
//! 1-10 quality score and a good/average/alert status, and serves that
//! scorer over HTTP and the command line.

pub mod config;
pub mod models;
pub mod reporters;
pub mod scoring;
pub mod server;
pub mod telemetry;

pub use models::{Assessment, Metric, Reading, Status};
pub use scoring::{classify, score, HeuristicPredictor, InputPolicy, Predictor};
