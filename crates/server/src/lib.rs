//! HTTP layer for the churn prediction service.
//!
//! Two routes over JSON:
//! - `GET /health` - liveness plus service name and version
//! - `POST /predict` - one row or a batch of rows to classify
//!
//! The pipeline's client-input errors come back as `400 {"error": ...}`;
//! inference faults (bad artifacts) come back as 500.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use pipeline::InferencePipeline;

/// Service name reported by /health.
pub const SERVICE_NAME: &str = "churn-serve";

/// Shared read-only state behind every handler.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<InferencePipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<InferencePipeline>) -> Self {
        Self { pipeline }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct PredictResponse {
    predictions: Vec<String>,
    probabilities: Option<Vec<f64>>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Build the service router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

/// Health check with service identity.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Classify one row or a batch of rows.
///
/// The raw body goes to the pipeline as-is so the "features" handling and
/// the error wording stay in one place. The transform is CPU-bound, so it
/// runs on the blocking pool rather than the async workers.
async fn predict(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let pipeline = state.pipeline.clone();
    let outcome =
        tokio::task::spawn_blocking(move || pipeline.predict_value(&body)).await;

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(join_err) => {
            error!("Prediction task panicked: {}", join_err);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "prediction task failed".to_string(),
            );
        }
    };

    match outcome {
        Ok(prediction) => Json(PredictResponse {
            predictions: prediction.predictions,
            probabilities: prediction.probabilities,
        })
        .into_response(),
        Err(err) if err.is_client_error() => {
            warn!("Rejected request: {}", err);
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err) => {
            error!("Inference fault: {}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}
