//! HTTP routes and handlers

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use mailsift_core::Decision;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::state::AppState;
use crate::template::IndexPage;

pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict_form))
        .route("/api/predict", post(predict_json))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Form submission from the page
///
/// A missing `email` field is treated as empty text.
#[derive(Debug, Default, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub email: String,
}

/// JSON prediction request
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub email: String,
}

/// JSON prediction response
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Machine-readable outcome
    pub outcome: String,

    /// Confidence in percent, for probability-capable models
    pub confidence: Option<f64>,

    /// Human-readable message, as shown on the page
    pub message: String,
}

impl From<&Decision> for PredictResponse {
    fn from(decision: &Decision) -> Self {
        Self {
            outcome: decision.outcome().to_string(),
            confidence: decision.confidence(),
            message: decision.to_string(),
        }
    }
}

async fn home() -> IndexPage {
    IndexPage::default()
}

async fn predict_form(
    State(state): State<AppState>,
    Form(form): Form<PredictForm>,
) -> IndexPage {
    metrics::counter!("mailsift_requests_total", "endpoint" => "form").increment(1);

    let decision = run_inference(&state, &form.email);
    IndexPage::with_decision(&decision)
}

async fn predict_json(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Json<PredictResponse> {
    metrics::counter!("mailsift_requests_total", "endpoint" => "api").increment(1);

    let decision = run_inference(&state, &req.email);
    Json(PredictResponse::from(&decision))
}

fn run_inference(state: &AppState, text: &str) -> Decision {
    let start = Instant::now();
    let decision = state.service.predict(text);
    let elapsed_us = start.elapsed().as_micros() as f64;

    metrics::counter!("mailsift_decisions_total", "outcome" => decision.outcome()).increment(1);
    metrics::histogram!("mailsift_inference_latency_us").record(elapsed_us);
    debug!(outcome = decision.outcome(), latency_us = elapsed_us, "Prediction complete");

    decision
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "model_loaded": state.service.is_model_loaded(),
    }))
}

async fn metrics_handler(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
