//! Integration tests for the embedding service
//!
//! The embedding provider is either an in-process mock implementing
//! `EmbeddingProvider` or a `mockito` HTTP server standing in for the
//! llama.cpp sidecar; no external services are required.

use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use embedding_service::{
    api::handlers::{self, AppState, EmbedRequest},
    error::{EmbedError, ProviderError, Result, ValidationError},
    observability::{HealthChecker, MetricsCollector},
    pipeline::BatchEncoder,
    provider::{EmbeddingProvider, LlamaClient},
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Provider whose vector encodes the input, so ordering is observable:
/// text of length n maps to the raw vector [n]
struct LengthProvider {
    calls: AtomicUsize,
}

impl LengthProvider {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for LengthProvider {
    async fn raw_embedding(&self, text: &str) -> Result<Vec<f64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![text.chars().count() as f64])
    }
}

struct FailingProvider;

#[async_trait]
impl EmbeddingProvider for FailingProvider {
    async fn raw_embedding(&self, _text: &str) -> Result<Vec<f64>> {
        Err(ProviderError::Api("Status 500: model not loaded".to_string()).into())
    }
}

fn state_with(provider: Arc<dyn EmbeddingProvider>, target_dim: i64) -> AppState {
    AppState {
        encoder: Arc::new(BatchEncoder::new(provider.clone(), target_dim)),
        health_checker: Arc::new(HealthChecker::new().with_provider(provider)),
        metrics: Arc::new(MetricsCollector::new()),
    }
}

fn request(inputs: &[&str]) -> EmbedRequest {
    EmbedRequest {
        inputs: inputs.iter().map(|s| s.to_string()).collect(),
        truncate: None,
    }
}

#[tokio::test]
async fn test_embed_preserves_input_order() {
    // target_dim 0 disables enforcement, so raw vectors pass through and
    // the ordering is directly visible in the response.
    let state = state_with(Arc::new(LengthProvider::new()), 0);

    let response = handlers::embed(State(state), Json(request(&["a", "bb", "ccc"])))
        .await
        .unwrap();

    assert_eq!(
        response.0.embeddings,
        vec![vec![1.0], vec![2.0], vec![3.0]]
    );
}

#[tokio::test]
async fn test_embed_normalizes_to_target_dim() {
    let state = state_with(Arc::new(LengthProvider::new()), 3);

    let response = handlers::embed(State(state), Json(request(&["hello"])))
        .await
        .unwrap();

    // Raw [5] padded to [5,0,0], then unit-normalized
    assert_eq!(response.0.embeddings, vec![vec![1.0, 0.0, 0.0]]);
}

#[tokio::test]
async fn test_empty_batch_is_a_client_fault() {
    let provider = Arc::new(LengthProvider::new());
    let state = state_with(provider.clone(), 4);

    let err = handlers::embed(State(state), Json(request(&[])))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.0.to_string(), "inputs cannot be empty");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_blank_item_aborts_batch_all_or_nothing() {
    let provider = Arc::new(LengthProvider::new());
    let state = state_with(provider.clone(), 4);

    let err = handlers::embed(State(state), Json(request(&["ok", "   "])))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.0.to_string(), "input text cannot be blank");
    assert!(matches!(
        err.0,
        EmbedError::Validation(ValidationError::BlankInput)
    ));
    // The first item was embedded before the blank one aborted the batch,
    // but its embedding was not returned.
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_provider_failure_is_a_server_fault() {
    let state = state_with(Arc::new(FailingProvider), 4);

    let err = handlers::embed(State(state), Json(request(&["hello"])))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.0.to_string().contains("model not loaded"));
}

#[tokio::test]
async fn test_truncate_field_has_no_effect() {
    let state = state_with(Arc::new(LengthProvider::new()), 3);

    let without = handlers::embed(State(state.clone()), Json(request(&["hello"])))
        .await
        .unwrap();

    let mut with_truncate = request(&["hello"]);
    with_truncate.truncate = Some("END".to_string());
    let with = handlers::embed(State(state), Json(with_truncate))
        .await
        .unwrap();

    assert_eq!(without.0.embeddings, with.0.embeddings);
}

#[tokio::test]
async fn test_missing_inputs_field_is_the_empty_batch_fault() {
    // A body without `inputs` parses as an empty batch, so the caller gets
    // the validation error rather than a deserializer rejection.
    let parsed: EmbedRequest = serde_json::from_str("{}").unwrap();
    assert!(parsed.inputs.is_empty());

    let state = state_with(Arc::new(LengthProvider::new()), 4);
    let err = handlers::embed(State(state), Json(parsed))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.0.to_string(), "inputs cannot be empty");
}

#[tokio::test]
async fn test_truncate_field_is_parsed_without_error() {
    let parsed: EmbedRequest =
        serde_json::from_str(r#"{"inputs":["hi"],"truncate":"NONE"}"#).unwrap();
    assert_eq!(parsed.inputs, vec!["hi".to_string()]);
    assert_eq!(parsed.truncate.as_deref(), Some("NONE"));

    let parsed: EmbedRequest = serde_json::from_str(r#"{"inputs":["hi"]}"#).unwrap();
    assert!(parsed.truncate.is_none());
}

#[tokio::test]
async fn test_metrics_record_requests_and_errors() {
    let state = state_with(Arc::new(LengthProvider::new()), 2);

    let _ = handlers::embed(State(state.clone()), Json(request(&["ok"]))).await;
    let _ = handlers::embed(State(state.clone()), Json(request(&[]))).await;

    let metrics = state.metrics.get_metrics();
    assert_eq!(metrics.total_requests, 2);
    assert_eq!(metrics.total_errors, 1);
}

#[tokio::test]
async fn test_end_to_end_against_mock_sidecar() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":[{"embedding":[3.0,4.0,9.9,9.9],"index":0}],"model":"gguf"}"#)
        .expect(2)
        .create_async()
        .await;

    let provider_config = embedding_service::config::ProviderConfig {
        endpoint: server.url(),
        api_key: None,
        model: None,
        timeout_secs: 5,
        max_retries: 1,
    };
    let provider: Arc<dyn EmbeddingProvider> =
        Arc::new(LlamaClient::new(provider_config).unwrap());
    let state = state_with(provider, 2);

    let response = handlers::embed(State(state), Json(request(&["first", "second"])))
        .await
        .unwrap();

    // Raw [3,4,9.9,9.9] truncated to [3,4], normalized to [0.6,0.8]
    assert_eq!(response.0.embeddings.len(), 2);
    for vector in &response.0.embeddings {
        assert!((vector[0] - 0.6).abs() < 1e-9);
        assert!((vector[1] - 0.8).abs() < 1e-9);
    }
}
