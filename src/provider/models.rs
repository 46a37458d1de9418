//! Wire models for the OpenAI-compatible embeddings endpoint

use serde::{Deserialize, Serialize};

/// Request to the provider's `/v1/embeddings` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// Text to embed
    pub input: String,

    /// Model name (optional, the sidecar falls back to its loaded model)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Response from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Embedding results; empty when the provider produced nothing
    #[serde(default)]
    pub data: Vec<EmbeddingData>,

    /// Model that served the request
    #[serde(default)]
    pub model: Option<String>,
}

/// One embedding entry in a provider response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingData {
    /// The raw vector; absent or empty when the provider mangled the entry
    #[serde(default)]
    pub embedding: Option<Vec<f64>>,

    /// Index in the batch
    #[serde(default)]
    pub index: usize,
}

impl ProviderRequest {
    /// Build a request for a single text
    pub fn new(text: impl Into<String>, model: Option<String>) -> Self {
        Self {
            input: text.into(),
            model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_omitted_when_absent() {
        let request = ProviderRequest::new("hello", None);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "input": "hello" }));
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: ProviderResponse =
            serde_json::from_str(r#"{"data":[{"embedding":[0.1,0.2]}]}"#).unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].embedding.as_deref(), Some(&[0.1, 0.2][..]));
        assert_eq!(response.data[0].index, 0);
    }

    #[test]
    fn test_response_tolerates_empty_body() {
        let response: ProviderResponse = serde_json::from_str("{}").unwrap();
        assert!(response.data.is_empty());
    }
}
