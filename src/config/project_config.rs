//! Service configuration support
//!
//! Loads configuration from `fishlinic.toml` or `.fishlinicrc.json` in the
//! working directory, falling back to the user config directory
//! (`~/.config/fishlinic/config.toml` on Linux).
//!
//! # Configuration Format
//!
//! ```toml
//! # fishlinic.toml
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [scoring]
//! input_policy = "clamp"   # or "reject"
//!
//! [defaults]
//! format = "text"
//! ```
//!
//! Environment variables override file values:
//! `FISHLINIC_HOST`, `FISHLINIC_PORT`, `FISHLINIC_INPUT_POLICY`.

use crate::scoring::InputPolicy;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const TOML_FILENAME: &str = "fishlinic.toml";
pub const JSON_FILENAME: &str = ".fishlinicrc.json";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct FishlinicConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Scoring behaviour
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// HTTP bind address
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn bind_address(&self) -> String {
        // IPv6 literals need brackets before the port
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Scoring configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct ScoringConfig {
    /// Clamp or reject out-of-domain pH / dissolved oxygen (default: clamp)
    #[serde(default)]
    pub input_policy: InputPolicy,
}

/// Default CLI flags that can be set in config
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct CliDefaults {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(p) => write!(f, "{}", p.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl FishlinicConfig {
    /// Load config from all sources, with priority:
    /// 1. Explicit path (errors if it cannot be read)
    /// 2. `fishlinic.toml` / `.fishlinicrc.json` in `dir`
    /// 3. User config (`<config dir>/fishlinic/config.toml`)
    /// 4. Built-in defaults
    ///
    /// Environment variables are applied on top.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<(Self, ConfigSource)> {
        let (mut config, source) = match explicit {
            Some(path) => {
                let config = load_file(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?;
                (config, ConfigSource::File(path.to_path_buf()))
            }
            None => discover(dir),
        };
        debug!("Using configuration from {}", source);

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok((config, source))
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fishlinic").join("config.toml"))
    }

    /// Apply `FISHLINIC_*` overrides using the given variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FISHLINIC_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("FISHLINIC_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("FISHLINIC_PORT '{}' is not a valid port", port))?;
        }
        if let Some(policy) = lookup("FISHLINIC_INPUT_POLICY") {
            self.scoring.input_policy = policy.parse()?;
        }
        Ok(())
    }

    /// Example configuration written by `fishlinic init`
    pub fn example() -> &'static str {
        r#"# Fishlinic Configuration

[server]
# Address the scoring service binds to
host = "0.0.0.0"
port = 8000

[scoring]
# What to do with pH outside 0-14 or dissolved oxygen outside 0-30 mg/L:
#   "clamp"  - snap to the nearest bound (default)
#   "reject" - refuse the reading
input_policy = "clamp"

[defaults]
# Default output format for `score` and `batch` (text, json)
format = "text"
"#
    }
}

/// Try each known config location in turn
fn discover(dir: &Path) -> (FishlinicConfig, ConfigSource) {
    let mut candidates = vec![dir.join(TOML_FILENAME), dir.join(JSON_FILENAME)];
    if let Some(user) = FishlinicConfig::user_config_path() {
        candidates.push(user);
    }

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return (config, ConfigSource::File(path));
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No config found, using defaults");
    (FishlinicConfig::default(), ConfigSource::Defaults)
}

/// Load a config file, picking the parser by extension
fn load_file(path: &Path) -> anyhow::Result<FishlinicConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}
