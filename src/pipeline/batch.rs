//! Batch orchestration over the embedding provider

use super::{normalize, validate};
use crate::error::Result;
use crate::provider::EmbeddingProvider;
use std::sync::Arc;
use tracing::debug;

/// Sequences validation, provider calls and normalization over an ordered
/// input batch.
///
/// The batch is all-or-nothing: the first failing item aborts the whole
/// request and no embeddings are returned, including ones already computed.
/// Inputs are processed sequentially, so output order trivially matches
/// input order. The encoder holds no mutable state and is safe to share
/// across in-flight requests.
pub struct BatchEncoder {
    provider: Arc<dyn EmbeddingProvider>,
    target_dim: i64,
}

impl BatchEncoder {
    /// Create an encoder over the given provider and target dimension
    pub fn new(provider: Arc<dyn EmbeddingProvider>, target_dim: i64) -> Self {
        Self {
            provider,
            target_dim,
        }
    }

    /// Target output dimension; zero or negative disables enforcement
    pub fn target_dim(&self) -> i64 {
        self.target_dim
    }

    /// Embed every input in order, returning one normalized vector per input.
    ///
    /// Item validation is deliberately lazy: each item is checked just
    /// before its provider call, so the first blank item encountered
    /// determines the error even when several items are invalid.
    pub async fn encode(&self, inputs: &[String]) -> Result<Vec<Vec<f64>>> {
        validate::batch(inputs)?;

        let mut embeddings = Vec::with_capacity(inputs.len());
        for text in inputs {
            validate::input(text)?;

            let raw = self.provider.raw_embedding(text).await?;
            debug!(len = raw.len(), "received raw embedding");

            embeddings.push(normalize(raw, self.target_dim));
        }

        Ok(embeddings)
    }
}
