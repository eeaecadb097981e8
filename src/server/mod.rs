//! HTTP scoring service
//!
//! Exposes the predictor over HTTP via axum.
//!
//! # Endpoints
//!
//! - `GET /health` - liveness probe, returns `{"status": "ok"}`
//! - `POST /predict` - body `{"pH": 7.2, "temp_c": 25.0, "do_mg_l": 6.2}`,
//!   returns `{"quality_ai": 9.1, "status_ai": "good"}`
//!
//! # Usage
//!
//! ```bash
//! fishlinic serve --port 8000
//! curl -s localhost:8000/predict -H 'content-type: application/json' \
//!      -d '{"pH": 7.2, "temp_c": 25.0, "do_mg_l": 6.2}'
//! ```

use crate::models::{Assessment, Reading};
use crate::scoring::{Predictor, ScoringError};
use anyhow::{Context, Result};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Shared state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
}

impl AppState {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self { predictor }
    }
}

/// Request body for `/predict`
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(rename = "pH")]
    pub ph: f64,
    pub temp_c: f64,
    pub do_mg_l: f64,
}

impl From<PredictRequest> for Reading {
    fn from(req: PredictRequest) -> Self {
        Reading::new(req.ph, req.temp_c, req.do_mg_l)
    }
}

/// Maps scoring failures onto HTTP responses
pub struct ApiError(ScoringError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

impl From<ScoringError> for ApiError {
    fn from(err: ScoringError) -> Self {
        Self(err)
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<PredictRequest>,
) -> Result<Json<Assessment>, ApiError> {
    let reading = Reading::from(payload);
    let assessment = state.predictor.predict(reading)?;
    debug!(
        "predict via {}: {:?} -> {:.1} ({})",
        state.predictor.name(),
        reading,
        assessment.score,
        assessment.status
    );
    Ok(Json(assessment))
}

/// Bind and serve until Ctrl-C
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let local = listener.local_addr()?;
    info!(
        "Scoring service ({} predictor) listening on http://{}",
        state.predictor.name(),
        local
    );
    eprintln!("   Listening on http://{}", local);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down scoring service");
        })
        .await?;

    Ok(())
}

/// Blocking entry point: start a runtime and serve
pub fn run_server(addr: &str, state: AppState) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(serve(addr, state))
}
