//! Configuration management for the embedding service

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod loader;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration for the backing embedding provider (a llama.cpp server
/// speaking the OpenAI-compatible embeddings format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider, e.g. `http://127.0.0.1:8081`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Optional bearer token (secured)
    #[serde(
        default,
        serialize_with = "serialize_optional_secret",
        deserialize_with = "deserialize_optional_secret"
    )]
    pub api_key: Option<Secret<String>>,

    /// Optional model name passed through on the wire
    #[serde(default)]
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retry attempts per provider call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Configuration for the vector post-processing pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Output vector dimension. Raw vectors are truncated or zero-padded to
    /// this length and then L2-normalized. Zero or negative disables
    /// dimension enforcement and returns raw vectors untouched.
    #[serde(default = "default_target_dim")]
    pub target_dim: i64,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size")]
    pub max_body_size_mb: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "json", "compact" or "pretty"
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_endpoint() -> String { "http://127.0.0.1:8081".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_max_retries() -> u32 { 3 }
fn default_target_dim() -> i64 { 1024 }
fn default_server_host() -> String { "0.0.0.0".to_string() }
fn default_server_port() -> u16 { 8080 }
fn default_max_body_size() -> usize { 10 }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            model: None,
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_dim: default_target_dim(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            max_body_size_mb: default_max_body_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            pipeline: PipelineConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        loader::load_config(path)
    }

    /// Load configuration from a TOML file with environment variable overrides
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        loader::load_config_with_env(path)
    }

    /// Validate this configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        loader::validate_config(self)
    }
}

/// Custom serializer for Option<Secret<String>>
fn serialize_optional_secret<S>(
    secret: &Option<Secret<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match secret {
        Some(s) => serializer.serialize_some(s.expose_secret()),
        None => serializer.serialize_none(),
    }
}

/// Custom deserializer for Option<Secret<String>>
fn deserialize_optional_secret<'de, D>(deserializer: D) -> Result<Option<Secret<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.map(Secret::new))
}
