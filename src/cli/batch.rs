//! Batch command - assess a telemetry log

use anyhow::{Context, Result};
use fishlinic::config::FishlinicConfig;
use fishlinic::models::Status;
use fishlinic::reporters::{report_batch, OutputFormat};
use fishlinic::scoring::HeuristicPredictor;
use fishlinic::telemetry::{read_records, BatchReport};
use std::path::Path;

/// Run the batch command
pub fn run(
    config: &FishlinicConfig,
    input: &Path,
    format: OutputFormat,
    fail_on: Option<&str>,
) -> Result<()> {
    let records = if input == Path::new("-") {
        read_records(std::io::stdin().lock()).context("Failed to read telemetry from stdin")?
    } else {
        let file = std::fs::File::open(input)
            .with_context(|| format!("Failed to open {}", input.display()))?;
        read_records(std::io::BufReader::new(file))
            .with_context(|| format!("Failed to read telemetry from {}", input.display()))?
    };

    let predictor = HeuristicPredictor::new(config.scoring.input_policy);
    let report = BatchReport::build(&predictor, records);
    println!("{}", report_batch(&report, format)?);

    check_fail_threshold(fail_on, &report)
}

/// Exit with code 1 when any record reaches the threshold status
fn check_fail_threshold(fail_on: Option<&str>, report: &BatchReport) -> Result<()> {
    if let Some(threshold) = fail_on {
        let status: Status = threshold.parse()?;
        let hits = report.summary.at_least(status);
        if hits > 0 {
            eprintln!(
                "Failing due to --fail-on={} threshold ({} record(s))",
                threshold, hits
            );
            std::process::exit(1);
        }
    }
    Ok(())
}
