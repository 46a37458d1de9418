//! HTTP client for a llama.cpp embedding server

use super::models::{ProviderRequest, ProviderResponse};
use super::EmbeddingProvider;
use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Client for a llama.cpp server started with `--embedding`, speaking the
/// OpenAI-compatible `/v1/embeddings` wire format. Model path, thread count
/// and context size are the sidecar's configuration, not this client's.
pub struct LlamaClient {
    config: ProviderConfig,
    http_client: Client,
}

impl LlamaClient {
    /// Create a new provider client
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ProviderError::Network)?;

        info!(endpoint = %config.endpoint, "Initialized embedding provider client");

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Create a client with a custom HTTP client
    pub fn with_http_client(config: ProviderConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.config.endpoint.trim_end_matches('/'))
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.endpoint.trim_end_matches('/'))
    }

    /// Make a provider request with retry logic
    async fn make_request(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        // At least one attempt even if a hand-built config says zero retries
        let max_attempts = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < max_attempts {
            attempts += 1;

            match self.try_request(request).await {
                Ok(response) => {
                    debug!("Provider request succeeded on attempt {}", attempts);
                    return Ok(response);
                }
                Err(e) => {
                    warn!("Provider request failed on attempt {}: {}", attempts, e);
                    last_error = Some(e);

                    if attempts < max_attempts {
                        // Exponential backoff with jitter, capped at 30s
                        let base_delay = 100 * 2_u64.pow(attempts - 1);
                        let delay = base_delay.min(30_000);

                        let jitter = (delay as f64 * 0.25 * (rand::random::<f64>() - 0.5)) as i64;
                        let final_delay =
                            Duration::from_millis((delay as i64 + jitter).max(0) as u64);

                        debug!("Retrying after {}ms", final_delay.as_millis());
                        tokio::time::sleep(final_delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap())
    }

    /// Try a single provider request
    async fn try_request(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        debug!("Making embedding provider request");

        let mut builder = self
            .http_client
            .post(self.embeddings_url())
            .header("Content-Type", "application/json")
            .json(request);

        if let Some(api_key) = &self.config.api_key {
            builder = builder.header(
                "Authorization",
                format!("Bearer {}", api_key.expose_secret()),
            );
        }

        let response = builder.send().await.map_err(ProviderError::Network)?;
        let status = response.status();

        match status {
            StatusCode::OK => {
                let provider_response: ProviderResponse = response
                    .json()
                    .await
                    .map_err(ProviderError::Network)?;

                debug!("Received {} embedding entries", provider_response.data.len());
                Ok(provider_response)
            }
            _ => {
                let error_text = response.text().await.unwrap_or_default();
                error!("Provider request failed with status {}: {}", status, error_text);
                Err(ProviderError::Api(format!("Status {}: {}", status, error_text)).into())
            }
        }
    }
}

#[async_trait]
impl EmbeddingProvider for LlamaClient {
    async fn raw_embedding(&self, text: &str) -> Result<Vec<f64>> {
        let request = ProviderRequest::new(text, self.config.model.clone());
        let response = self.make_request(&request).await?;

        if response.data.is_empty() {
            error!("Provider response lacked data: {:?}", response);
            return Err(ProviderError::EmptyData.into());
        }

        match &response.data[0].embedding {
            Some(vector) if !vector.is_empty() => Ok(vector.clone()),
            _ => {
                error!("Provider response lacked vector: {:?}", response);
                Err(ProviderError::EmptyEmbedding.into())
            }
        }
    }

    async fn ready(&self) -> bool {
        match self.http_client.get(self.health_url()).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Provider health probe failed: {}", e);
                false
            }
        }
    }
}
