use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use feedback_interp::{TransformationFailure, TransformationRequest};
use feedback_interp_pipeline::{FeedbackRecord, Interpreter};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{error::AppError, state::AppState};

#[derive(Serialize, Deserialize)]
pub struct InterpretResponse {
    pub output: String,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/health", get(health_handler))
        .route("/api/interpret", post(interpret_handler))
        .route("/api/feedback-records", get(records_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn serve_index() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        include_str!("static/index.html"),
    )
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

pub async fn interpret_handler(
    State(state): State<AppState>,
    Json(request): Json<TransformationRequest>,
) -> Result<Json<InterpretResponse>, AppError> {
    if request.is_blank() {
        return Err(AppError::EmptyInput);
    }

    info!(
        chars = request.text.chars().count(),
        options = %request.options.describe(),
        provider = state.interpreter.provider_name(),
        "interpreting feedback"
    );

    let output = state.interpreter.interpret(&request).await.map_err(|e| {
        warn!(error = %e, "interpretation failed");
        let failure = TransformationFailure::from(e);
        AppError::Interpretation(failure.display_message().to_string())
    })?;

    state.records.push(&request.text, request.options, &output);

    Ok(Json(InterpretResponse { output }))
}

pub async fn records_handler(State(state): State<AppState>) -> Json<Vec<FeedbackRecord>> {
    Json(state.records.list())
}
