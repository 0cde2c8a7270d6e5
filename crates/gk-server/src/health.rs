//! Health Check System
//!
//! Readiness reflects whether the process is configured well enough to
//! issue sessions that survive a restart and to drive the provider login.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use gk_core::config::{AppConfig, SecretSource};
use serde::{Deserialize, Serialize};

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy | Self::Degraded)
    }

    fn worst(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unhealthy, _) | (_, Self::Unhealthy) => Self::Unhealthy,
            (Self::Degraded, _) | (_, Self::Degraded) => Self::Degraded,
            _ => Self::Healthy,
        }
    }
}

/// Individual component health
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall health report
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Degraded => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Health checker service
pub struct HealthChecker {
    start_time: Instant,
    secret_source: SecretSource,
    provider_configured: bool,
    production: bool,
}

impl HealthChecker {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            start_time: Instant::now(),
            secret_source: config.session.signing_secret().1,
            provider_configured: config.identity_provider.is_configured(),
            production: config.environment.is_production(),
        }
    }

    pub fn check(&self) -> HealthReport {
        let components = vec![self.check_signing_secret(), self.check_identity_provider()];
        let status = components
            .iter()
            .fold(HealthStatus::Healthy, |acc, c| acc.worst(c.status));

        HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            components,
            timestamp: chrono::Utc::now(),
        }
    }

    fn check_signing_secret(&self) -> ComponentHealth {
        let (status, message) = match self.secret_source {
            SecretSource::Configured => (HealthStatus::Healthy, "COOKIE_SECRET configured"),
            SecretSource::Fallback => (
                HealthStatus::Degraded,
                "Using the built-in development secret",
            ),
        };

        ComponentHealth {
            name: "session_signing".to_string(),
            status,
            message: Some(message.to_string()),
        }
    }

    fn check_identity_provider(&self) -> ComponentHealth {
        let status = match (self.provider_configured, self.production) {
            (true, _) => HealthStatus::Healthy,
            (false, false) => HealthStatus::Degraded,
            (false, true) => HealthStatus::Unhealthy,
        };

        ComponentHealth {
            name: "identity_provider".to_string(),
            status,
            message: (!self.provider_configured)
                .then(|| "Client id or tenant id missing".to_string()),
        }
    }
}

/// Simple liveness check (Kubernetes)
pub async fn liveness() -> &'static str {
    "OK"
}

/// Readiness check (Kubernetes)
pub async fn readiness(State(health): State<Arc<HealthChecker>>) -> (StatusCode, Json<HealthReport>) {
    let report = health.check();
    let status = report.http_status();
    (status, Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gk_core::config::Environment;

    fn configured() -> AppConfig {
        let mut config = AppConfig::default();
        config.session.cookie_secret = Some("secret".into());
        config.identity_provider.client_id = Some("client".into());
        config.identity_provider.tenant_id = Some("tenant".into());
        config
    }

    #[test]
    fn test_healthy_when_configured() {
        let report = HealthChecker::new(&configured()).check();

        assert_eq!(report.status, HealthStatus::Healthy);
        assert_eq!(report.components.len(), 2);
        assert_eq!(report.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_fallback_secret_degrades() {
        let mut config = configured();
        config.session.cookie_secret = None;

        let report = HealthChecker::new(&config).check();
        assert_eq!(report.status, HealthStatus::Degraded);
        assert!(report.status.is_healthy());
    }

    #[test]
    fn test_missing_provider_in_production_is_unhealthy() {
        let mut config = configured();
        config.environment = Environment::Production;
        config.identity_provider.client_id = None;

        let report = HealthChecker::new(&config).check();
        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert_eq!(report.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
