//! Error types for the embedding service

use thiserror::Error;

/// Result type alias for embedding service operations
pub type Result<T> = std::result::Result<T, EmbedError>;

/// Main error type for the embedding service
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Client-fault errors, raised before the provider is called for the offending item
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("inputs cannot be empty")]
    EmptyBatch,

    #[error("input text cannot be blank")]
    BlankInput,
}

/// Server-fault errors from the backing embedding provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("embedding provider returned empty data")]
    EmptyData,

    #[error("embedding provider returned empty embedding")]
    EmptyEmbedding,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for EmbedError {
    fn from(err: config::ConfigError) -> Self {
        EmbedError::Config(err.to_string())
    }
}
