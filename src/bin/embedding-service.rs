//! Embedding Service Binary
//!
//! Entry point for running the embedding service as a standalone server:
//! loads configuration, wires the provider client into the request path and
//! serves the HTTP API with graceful shutdown.

use embedding_service::{
    api::{build_router, AppState},
    config::{loader, Config},
    observability::{HealthChecker, MetricsCollector},
    pipeline::BatchEncoder,
    provider::{EmbeddingProvider, LlamaClient},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration: a TOML file when present, otherwise environment
    // variables over built-in defaults
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let config = if std::path::Path::new(&config_path).exists() {
        Config::from_file_with_env(&config_path)?
    } else {
        loader::load_config_from_env()?
    };

    init_tracing(&config);

    info!("Starting Embedding Service");
    info!("Configuration loaded (target_dim: {})", config.pipeline.target_dim);

    // Initialize metrics
    let metrics = Arc::new(MetricsCollector::new());

    // Initialize the embedding provider
    let provider: Arc<dyn EmbeddingProvider> =
        Arc::new(LlamaClient::new(config.provider.clone())?);
    info!("Embedding provider client initialized");

    // Initialize the batch encoder
    let encoder = Arc::new(BatchEncoder::new(
        provider.clone(),
        config.pipeline.target_dim,
    ));

    // Initialize health checker
    let health_checker = Arc::new(HealthChecker::new().with_provider(provider));
    info!("Health checker initialized");

    // Create application state
    let app_state = AppState {
        encoder,
        health_checker,
        metrics,
    };

    // Build router
    let max_body_bytes = config.server.max_body_size_mb * 1024 * 1024;
    let app = build_router(app_state, max_body_bytes);

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Initialize tracing with the configured level and format
fn init_tracing(config: &Config) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    match config.logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .json()
                .with_env_filter(filter)
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .compact()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .with_env_filter(filter)
                .init();
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Starting graceful shutdown");
}
