//! Access gate for protected paths
//!
//! Must be layered inside the session middleware: it only reads the
//! [`RequestIdentity`] that middleware attached.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use gk_core::config::AccessConfig;
use tracing::debug;

use crate::codec::SessionClaims;
use crate::identity::RequestIdentity;
use crate::redirect::Redirection;

/// Outcome of the gate check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Deny(Redirection),
}

/// Path-prefix rule plus the login redirect target
#[derive(Debug, Clone)]
pub struct AccessGate {
    protected_prefix: String,
    login_path: String,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new("/protected", "/login")
    }
}

impl AccessGate {
    pub fn new(protected_prefix: impl Into<String>, login_path: impl Into<String>) -> Self {
        Self {
            protected_prefix: protected_prefix.into(),
            login_path: login_path.into(),
        }
    }

    pub fn from_config(config: &AccessConfig) -> Self {
        Self::new(config.protected_prefix.clone(), config.login_path.clone())
    }

    /// Plain prefix match, so `/protectedarea` is gated as well.
    pub fn is_protected(&self, path: &str) -> bool {
        path.starts_with(&self.protected_prefix)
    }

    pub fn evaluate(&self, path: &str, identity: Option<&SessionClaims>) -> GateDecision {
        if self.is_protected(path) && identity.is_none() {
            GateDecision::Deny(Redirection::see_other(self.login_path.clone()))
        } else {
            GateDecision::Continue
        }
    }
}

/// Gate middleware
pub async fn access_gate(State(gate): State<AccessGate>, request: Request, next: Next) -> Response {
    let identity = request.extensions().get::<RequestIdentity>();
    let decision = gate.evaluate(request.uri().path(), identity.and_then(RequestIdentity::claims));

    match decision {
        GateDecision::Continue => next.run(request).await,
        GateDecision::Deny(redirect) => {
            debug!(path = %request.uri().path(), location = %redirect.location, "Unauthenticated request to protected path");
            redirect.into_response()
        }
    }
}
