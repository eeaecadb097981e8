//! Score command - assess a single reading

use anyhow::Result;
use fishlinic::config::FishlinicConfig;
use fishlinic::models::Reading;
use fishlinic::reporters::{report_assessment, OutputFormat};
use fishlinic::scoring::HeuristicPredictor;

/// Run the score command
pub fn run(
    config: &FishlinicConfig,
    ph: f64,
    temp_c: f64,
    do_mg_l: f64,
    format: OutputFormat,
    explain: bool,
) -> Result<()> {
    let predictor = HeuristicPredictor::new(config.scoring.input_policy);
    let breakdown = predictor.breakdown(Reading::new(ph, temp_c, do_mg_l))?;
    print!("{}", report_assessment(&breakdown, format, explain)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
