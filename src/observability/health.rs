//! Health check endpoints and monitoring

use crate::provider::EmbeddingProvider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Health status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Component health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component name
    pub name: String,

    /// Health status
    pub status: HealthStatus,

    /// Optional message
    pub message: Option<String>,

    /// Response time in milliseconds
    pub response_time_ms: Option<u64>,
}

/// Overall system health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemHealth {
    /// Overall status
    pub status: HealthStatus,

    /// Uptime in seconds
    pub uptime_secs: u64,

    /// Component health checks
    pub components: Vec<ComponentHealth>,

    /// Timestamp
    pub timestamp: i64,
}

/// Cached health check result
#[derive(Debug, Clone)]
struct CachedHealth {
    result: SystemHealth,
    cached_at: Instant,
}

/// Health checker with caching
pub struct HealthChecker {
    start_time: Instant,
    provider: Option<Arc<dyn EmbeddingProvider>>,
    cached_result: Arc<RwLock<Option<CachedHealth>>>,
    cache_ttl: Duration,
}

impl HealthChecker {
    /// Create a new health checker with default 30-second cache TTL
    pub fn new() -> Self {
        Self::with_cache_ttl(Duration::from_secs(30))
    }

    /// Create a new health checker with custom cache TTL
    pub fn with_cache_ttl(cache_ttl: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            provider: None,
            cached_result: Arc::new(RwLock::new(None)),
            cache_ttl,
        }
    }

    /// Set the embedding provider to probe
    pub fn with_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Check overall system health with caching
    pub async fn check_health(&self) -> SystemHealth {
        {
            let cached = self.cached_result.read().await;
            if let Some(cached_health) = &*cached {
                if cached_health.cached_at.elapsed() < self.cache_ttl {
                    debug!("Returning cached health check result");
                    return cached_health.result.clone();
                }
            }
        }

        debug!("Performing fresh health check");
        let health = self.perform_health_check().await;

        {
            let mut cached = self.cached_result.write().await;
            *cached = Some(CachedHealth {
                result: health.clone(),
                cached_at: Instant::now(),
            });
        }

        health
    }

    /// Perform actual health check (uncached)
    async fn perform_health_check(&self) -> SystemHealth {
        let components = vec![self.check_provider().await];

        let status = if components.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else if components.iter().any(|c| c.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Degraded
        };

        SystemHealth {
            status,
            uptime_secs: self.start_time.elapsed().as_secs(),
            components,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Check embedding provider health
    async fn check_provider(&self) -> ComponentHealth {
        let start = Instant::now();

        if let Some(provider) = &self.provider {
            match tokio::time::timeout(Duration::from_secs(5), provider.ready()).await {
                Ok(true) => ComponentHealth {
                    name: "embedding_provider".to_string(),
                    status: HealthStatus::Healthy,
                    message: Some("Provider operational".to_string()),
                    response_time_ms: Some(start.elapsed().as_millis() as u64),
                },
                Ok(false) => ComponentHealth {
                    name: "embedding_provider".to_string(),
                    status: HealthStatus::Unhealthy,
                    message: Some("Provider probe failed".to_string()),
                    response_time_ms: Some(start.elapsed().as_millis() as u64),
                },
                Err(_) => ComponentHealth {
                    name: "embedding_provider".to_string(),
                    status: HealthStatus::Unhealthy,
                    message: Some("Health check timeout".to_string()),
                    response_time_ms: Some(5000),
                },
            }
        } else {
            ComponentHealth {
                name: "embedding_provider".to_string(),
                status: HealthStatus::Degraded,
                message: Some("Not configured".to_string()),
                response_time_ms: None,
            }
        }
    }

    /// Simple liveness check
    pub fn liveness(&self) -> bool {
        true
    }

    /// Readiness check
    pub async fn readiness(&self) -> bool {
        let health = self.check_health().await;
        health.status != HealthStatus::Unhealthy
    }
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;

    struct AlwaysReady;

    #[async_trait]
    impl EmbeddingProvider for AlwaysReady {
        async fn raw_embedding(&self, _text: &str) -> Result<Vec<f64>> {
            Ok(vec![1.0])
        }
    }

    struct NeverReady;

    #[async_trait]
    impl EmbeddingProvider for NeverReady {
        async fn raw_embedding(&self, _text: &str) -> Result<Vec<f64>> {
            Ok(vec![1.0])
        }

        async fn ready(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn test_health_without_provider_is_degraded() {
        let checker = HealthChecker::new();
        let health = checker.check_health().await;

        assert_eq!(health.status, HealthStatus::Degraded);
        assert_eq!(health.components.len(), 1);
    }

    #[tokio::test]
    async fn test_health_with_ready_provider() {
        let checker = HealthChecker::new().with_provider(Arc::new(AlwaysReady));
        let health = checker.check_health().await;

        assert_eq!(health.status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn test_readiness_with_failing_provider() {
        let checker = HealthChecker::new().with_provider(Arc::new(NeverReady));
        assert!(!checker.readiness().await);
    }

    #[test]
    fn test_liveness() {
        let checker = HealthChecker::new();
        assert!(checker.liveness());
    }
}
