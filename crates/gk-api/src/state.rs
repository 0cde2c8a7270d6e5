//! Application state

use std::sync::Arc;

use axum::extract::FromRef;
use chrono::Duration;
use gk_auth::{
    AccessGate, AssertionVerifier, CookieConfig, IdentityProviderClient, SessionAuth, SessionCodec,
    TrustUpstream,
};
use gk_core::config::{AccessConfig, AppConfig};

/// Everything the handlers and middleware share; built once at startup
#[derive(Clone)]
pub struct AppState {
    pub session: SessionAuth,
    pub gate: AccessGate,
    pub access: Arc<AccessConfig>,
    pub provider: Arc<IdentityProviderClient>,
    pub verifier: Arc<dyn AssertionVerifier>,
    /// Lifetime of newly issued session tokens
    pub session_ttl: Duration,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        let (secret, _) = config.session.signing_secret();
        let cookies =
            CookieConfig::from_session_config(&config.session, config.environment.is_production());

        Self {
            session: SessionAuth::new(SessionCodec::new(secret.as_bytes()), cookies),
            gate: AccessGate::from_config(&config.access),
            access: Arc::new(config.access.clone()),
            provider: Arc::new(IdentityProviderClient::from_config(&config.identity_provider)),
            verifier: Arc::new(TrustUpstream),
            session_ttl: Duration::seconds(config.session.ttl_seconds),
        }
    }

    /// Replace the assertion verifier
    pub fn with_verifier(mut self, verifier: Arc<dyn AssertionVerifier>) -> Self {
        self.verifier = verifier;
        self
    }
}

impl FromRef<AppState> for SessionAuth {
    fn from_ref(state: &AppState) -> Self {
        state.session.clone()
    }
}

impl FromRef<AppState> for AccessGate {
    fn from_ref(state: &AppState) -> Self {
        state.gate.clone()
    }
}
