//! Configuration module for Fishlinic
//!
//! This module handles:
//! - Project / user configuration (fishlinic.toml, .fishlinicrc.json)
//! - Environment overrides
//! - Scoring input policy
//! - CLI defaults

mod project_config;

pub use project_config::{
    CliDefaults,
    ConfigSource,
    FishlinicConfig,
    ScoringConfig,
    ServerConfig,
    JSON_FILENAME,
    TOML_FILENAME,
};
