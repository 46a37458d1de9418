//! Configuration loader with environment variable support

use super::Config;
use crate::error::{EmbedError, Result};
use config::{Environment, File};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = config::Config::builder()
        .add_source(File::from(path.as_ref()))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Load configuration from a TOML file with environment variable overrides
pub fn load_config_with_env<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = config::Config::builder()
        .add_source(File::from(path.as_ref()))
        .add_source(
            Environment::with_prefix("EMBEDDING_SERVICE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Load configuration from environment variables alone, falling back to
/// built-in defaults. Used when no config file is present.
pub fn load_config_from_env() -> Result<Config> {
    let config = config::Config::builder()
        .add_source(
            Environment::with_prefix("EMBEDDING_SERVICE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // An empty environment still deserializes: every field carries a serde
    // default. A malformed override must fail loudly, not fall back.
    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.provider.endpoint.is_empty() {
        return Err(EmbedError::Config(
            "Provider endpoint is required".to_string(),
        ));
    }

    if config.provider.timeout_secs == 0 {
        return Err(EmbedError::Config(
            "Provider timeout must be greater than 0".to_string(),
        ));
    }

    if config.provider.max_retries == 0 {
        return Err(EmbedError::Config(
            "Provider max retries must be greater than 0".to_string(),
        ));
    }

    if config.server.max_body_size_mb == 0 {
        return Err(EmbedError::Config(
            "Max body size must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
