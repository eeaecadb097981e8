//! Serve command - run the HTTP scoring service

use anyhow::Result;
use fishlinic::config::FishlinicConfig;
use fishlinic::scoring::HeuristicPredictor;
use fishlinic::server::{run_server, AppState};
use std::sync::Arc;

/// Run the HTTP server
pub fn run(config: &FishlinicConfig) -> Result<()> {
    let predictor = HeuristicPredictor::new(config.scoring.input_policy);
    let state = AppState::new(Arc::new(predictor));
    run_server(&config.server.bind_address(), state)
}
