//! Embedding Service - batch text embeddings with dimension enforcement
//!
//! An HTTP service that turns batches of text strings into fixed-dimension,
//! L2-normalized embedding vectors. The embedding model itself runs out of
//! process (a llama.cpp server speaking the OpenAI-compatible embeddings
//! format); this crate owns the contract layered on top of it:
//!
//! - **Validation**: empty batches and blank inputs are rejected as client
//!   faults before any provider call.
//! - **Normalization**: raw vectors are truncated or zero-padded to the
//!   configured `target_dim` and scaled to unit L2 norm. Zero or negative
//!   `target_dim` disables enforcement entirely.
//! - **Batch policy**: all-or-nothing. The first failing item aborts the
//!   request; output order always matches input order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use embedding_service::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::default();
//!
//!     let provider: Arc<dyn EmbeddingProvider> =
//!         Arc::new(LlamaClient::new(config.provider.clone())?);
//!     let encoder = BatchEncoder::new(provider, config.pipeline.target_dim);
//!
//!     let inputs = vec!["hello world".to_string()];
//!     let embeddings = encoder.encode(&inputs).await?;
//!     assert_eq!(embeddings.len(), inputs.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod observability;
pub mod pipeline;
pub mod provider;

pub use config::Config;
pub use error::{EmbedError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{EmbedError, ProviderError, Result, ValidationError};
    pub use crate::observability::{HealthChecker, MetricsCollector};
    pub use crate::pipeline::{normalize, BatchEncoder};
    pub use crate::provider::{EmbeddingProvider, LlamaClient};
}
