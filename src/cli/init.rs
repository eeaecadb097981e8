//! Init command - write an example configuration

use anyhow::{Context, Result};
use console::style;
use fishlinic::config::{FishlinicConfig, TOML_FILENAME};
use std::path::Path;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(TOML_FILENAME);
    if config_path.exists() {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, FishlinicConfig::example())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\nNext steps:");
    println!("  {} Score a reading", style("fishlinic score --ph 7.2 --temp 25 --do 6.2").cyan());
    println!("  {} Start the service", style("fishlinic serve").cyan());

    Ok(())
}
