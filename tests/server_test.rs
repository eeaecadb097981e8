//! HTTP contract tests for the scoring service
//!
//! Drives the axum router in-process; no socket is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use fishlinic::scoring::{HeuristicPredictor, InputPolicy};
use fishlinic::server::{router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

fn app(policy: InputPolicy) -> axum::Router {
    router(AppState::new(Arc::new(HeuristicPredictor::new(policy))))
}

async fn post_predict(app: axum::Router, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let response = app(InputPolicy::Clamp)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["status"], "ok");
}

#[tokio::test]
async fn test_predict_good_reading() {
    let (status, v) = post_predict(
        app(InputPolicy::Clamp),
        r#"{"pH": 7.0, "temp_c": 25.0, "do_mg_l": 7.0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["quality_ai"], 9.7);
    assert_eq!(v["status_ai"], "good");
}

#[tokio::test]
async fn test_predict_average_reading() {
    let (status, v) = post_predict(
        app(InputPolicy::Clamp),
        r#"{"pH": 6.2, "temp_c": 19.0, "do_mg_l": 4.0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["quality_ai"], 3.7);
    assert_eq!(v["status_ai"], "average");
}

#[tokio::test]
async fn test_predict_clamps_by_default() {
    let (_, raw) = post_predict(
        app(InputPolicy::Clamp),
        r#"{"pH": 20.0, "temp_c": 25.0, "do_mg_l": -5.0}"#,
    )
    .await;
    let (_, bounded) = post_predict(
        app(InputPolicy::Clamp),
        r#"{"pH": 14.0, "temp_c": 25.0, "do_mg_l": 0.0}"#,
    )
    .await;
    assert_eq!(raw, bounded);
    assert_eq!(raw["status_ai"], "alert");
}

#[tokio::test]
async fn test_predict_reject_policy_returns_422() {
    let (status, v) = post_predict(
        app(InputPolicy::Reject),
        r#"{"pH": 20.0, "temp_c": 25.0, "do_mg_l": 7.0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(v["error"].as_str().unwrap().contains("pH"));
}

#[tokio::test]
async fn test_predict_missing_field_is_client_error() {
    let (status, _) = post_predict(app(InputPolicy::Clamp), r#"{"pH": 7.0, "temp_c": 25.0}"#).await;
    assert!(status.is_client_error(), "status {status}");
}

#[tokio::test]
async fn test_predict_malformed_body_is_client_error() {
    let (status, _) = post_predict(app(InputPolicy::Clamp), "not json").await;
    assert!(status.is_client_error(), "status {status}");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = app(InputPolicy::Clamp)
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
