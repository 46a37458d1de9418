//! API route configuration

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};
use crate::observability::HealthStatus;

/// Build the complete API router
pub fn build_router(app_state: AppState, max_body_size: usize) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .route("/metrics", get(metrics_handler))
        .route("/embed", post(handlers::embed))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}

/// Root handler
async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "service": "Embedding Service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Full health check handler
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.health_checker.check_health().await;
    let status_code = match health.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Liveness probe handler - always returns 200
async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "alive"})))
}

/// Readiness probe handler - checks the provider is reachable
async fn readiness_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.health_checker.readiness().await {
        (StatusCode::OK, Json(json!({"status": "ready"})))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "not_ready"})),
        )
    }
}

/// Metrics handler (Prometheus text format)
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics.export_prometheus()
}
