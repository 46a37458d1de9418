//! API request handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

use crate::{
    error::EmbedError,
    observability::{HealthChecker, MetricsCollector},
    pipeline::BatchEncoder,
};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub encoder: Arc<BatchEncoder>,
    pub health_checker: Arc<HealthChecker>,
    pub metrics: Arc<MetricsCollector>,
}

/// Request to embed a batch of texts
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedRequest {
    /// Input texts, in order; the response preserves this order. A body
    /// omitting the field parses as an empty batch and is rejected by
    /// validation, not by the deserializer.
    #[serde(default)]
    pub inputs: Vec<String>,

    /// Compatibility placeholder carried by some embedding clients.
    /// Accepted and ignored; it has no effect on the output.
    #[serde(default)]
    pub truncate: Option<String>,
}

/// Response carrying one normalized vector per input, in input order
#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    pub embeddings: Vec<Vec<f64>>,
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error wrapper mapping the internal taxonomy onto HTTP status classes:
/// validation failures are client faults (400), everything else is a
/// server fault (500).
#[derive(Debug)]
pub struct ApiError(pub EmbedError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            EmbedError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<EmbedError> for ApiError {
    fn from(err: EmbedError) -> Self {
        Self(err)
    }
}

/// Embed a batch of texts
///
/// The batch is all-or-nothing: the first invalid item or provider failure
/// aborts the request and no embeddings are returned.
pub async fn embed(
    State(state): State<AppState>,
    Json(request): Json<EmbedRequest>,
) -> Result<Json<EmbedResponse>, ApiError> {
    let start = Instant::now();

    if request.truncate.is_some() {
        debug!("Ignoring truncate field (compatibility placeholder)");
    }

    let result = state.encoder.encode(&request.inputs).await;
    state.metrics.record_request(start.elapsed(), result.is_err());

    match result {
        Ok(embeddings) => Ok(Json(EmbedResponse { embeddings })),
        Err(e) => {
            if !matches!(e, EmbedError::Validation(_)) {
                error!("Embedding generation failed: {}", e);
            }
            Err(e.into())
        }
    }
}
