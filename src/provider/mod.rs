//! Embedding provider abstraction and the llama.cpp HTTP client

pub mod client;
pub mod models;

pub use client::LlamaClient;
pub use models::{ProviderRequest, ProviderResponse};

use crate::error::Result;
use async_trait::async_trait;

/// Capability object for computing raw embedding vectors.
///
/// Constructed once at startup and shared behind an `Arc` into the request
/// path; implementations must be safe to call concurrently from multiple
/// in-flight requests.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Compute the raw, model-length embedding vector for one text
    async fn raw_embedding(&self, text: &str) -> Result<Vec<f64>>;

    /// Cheap readiness probe against the backing service
    async fn ready(&self) -> bool {
        true
    }
}
