//! CLI command definitions and handlers

mod batch;
mod init;
mod score;
mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fishlinic::config::{ConfigSource, FishlinicConfig};
use fishlinic::reporters::OutputFormat;
use std::path::{Path, PathBuf};

/// Fishlinic - water quality scoring for fish tanks
#[derive(Parser, Debug)]
#[command(name = "fishlinic")]
#[command(
    version,
    about = "Water quality scoring - turn pH, temperature and dissolved oxygen into a 1-10 score and a good/average/alert status",
    after_help = "\
Examples:
  fishlinic score --ph 7.2 --temp 25 --do 6.2      Score one reading
  fishlinic score --ph 6.2 --temp 19 --do 4 --explain
  fishlinic batch telemetry.jsonl --fail-on alert  Score a telemetry log (CI mode)
  fishlinic serve --port 8000                      Start the HTTP scoring service
  fishlinic init                                   Write an example fishlinic.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Path to a config file (default: ./fishlinic.toml, ./.fishlinicrc.json, user config)
    #[arg(long, global = true, env = "FISHLINIC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a single reading
    #[command(after_help = "\
Examples:
  fishlinic score --ph 7.0 --temp 25 --do 7.0
  fishlinic score --ph 20 --temp 25 --do -5          Out-of-range values are clamped
  fishlinic score --ph 7.0 --temp 25 --do 7.0 -f json")]
    Score {
        /// pH (0-14)
        #[arg(long, allow_negative_numbers = true)]
        ph: f64,

        /// Water temperature in °C
        #[arg(long, allow_negative_numbers = true)]
        temp: f64,

        /// Dissolved oxygen in mg/L (0-30)
        #[arg(long = "do", allow_negative_numbers = true)]
        dissolved_oxygen: f64,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Show the sub-score breakdown
        #[arg(long)]
        explain: bool,
    },

    /// Score every record of a telemetry log (JSON Lines or JSON array)
    Batch {
        /// Telemetry file, or `-` for stdin
        input: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Exit with code 1 if any record is at this status or worse
        #[arg(long, value_parser = ["average", "alert"])]
        fail_on: Option<String>,
    },

    /// Start the HTTP scoring service
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write an example fishlinic.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved configuration and where it came from
    Show,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Score {
            ph,
            temp,
            dissolved_oxygen,
            format,
            explain,
        } => {
            let (config, _) = load_config(cli.config.as_deref())?;
            let format = resolve_format(format, &config)?;
            score::run(&config, ph, temp, dissolved_oxygen, format, explain)
        }

        Commands::Batch {
            input,
            format,
            fail_on,
        } => {
            let (config, _) = load_config(cli.config.as_deref())?;
            let format = resolve_format(format, &config)?;
            batch::run(&config, &input, format, fail_on.as_deref())
        }

        Commands::Serve { host, port } => {
            let (mut config, _) = load_config(cli.config.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve::run(&config)
        }

        Commands::Init { dir } => init::run(&dir),

        Commands::Config {
            action: ConfigAction::Show,
        } => show_config(cli.config.as_deref()),

        Commands::Version => {
            println!("fishlinic {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<(FishlinicConfig, ConfigSource)> {
    FishlinicConfig::load(explicit, Path::new("."))
}

/// CLI flag > config default > text
fn resolve_format(flag: Option<String>, config: &FishlinicConfig) -> Result<OutputFormat> {
    flag.or_else(|| config.defaults.format.clone())
        .map(|f| f.parse::<OutputFormat>())
        .transpose()
        .map(|f| f.unwrap_or_default())
}

fn show_config(explicit: Option<&Path>) -> Result<()> {
    let (config, source) = load_config(explicit)?;
    println!("Config source: {}", source);
    if let Some(user_path) = FishlinicConfig::user_config_path() {
        let status = if user_path.exists() { "✓" } else { "(not found)" };
        println!("User config:   {} {}", user_path.display(), status);
    }
    println!();
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
