//! Identity provider client
//!
//! The browser performs the actual login against Microsoft Entra ID. The
//! server only owns the client settings it hands to that flow and the hook
//! for checking the assertion the browser posts back. One client is built
//! at startup and shared through the application state.

use async_trait::async_trait;
use gk_core::config::IdentityProviderConfig;
use serde::Serialize;
use tracing::warn;

use crate::assertion::{AssertionError, IdentityAssertion};

const AUTHORITY_BASE: &str = "https://login.microsoftonline.com";

/// Scopes requested by the browser login
pub const LOGIN_SCOPES: [&str; 4] = ["openid", "profile", "email", "User.Read"];

/// Settings for the browser-side authentication library
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserClientConfig {
    pub auth: BrowserAuthConfig,
    pub cache: BrowserCacheConfig,
    pub login_request: LoginRequest,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserAuthConfig {
    pub client_id: String,
    pub authority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserCacheConfig {
    pub cache_location: &'static str,
    pub store_auth_state_in_cookie: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub scopes: Vec<String>,
}

/// Identity provider client settings
#[derive(Debug, Clone)]
pub struct IdentityProviderClient {
    client_id: String,
    tenant_id: String,
    redirect_uri: Option<String>,
}

impl IdentityProviderClient {
    pub fn new(client_id: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            tenant_id: tenant_id.into(),
            redirect_uri: None,
        }
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Build from configuration; unset values become empty strings so the
    /// browser gets a config it can report on instead of a missing one.
    pub fn from_config(config: &IdentityProviderConfig) -> Self {
        if !config.is_configured() {
            warn!("Identity provider client id or tenant id is not configured");
        }

        Self {
            client_id: config.client_id.clone().unwrap_or_default(),
            tenant_id: config.tenant_id.clone().unwrap_or_default(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn authority(&self) -> String {
        format!("{}/{}", AUTHORITY_BASE, self.tenant_id)
    }

    pub fn browser_config(&self) -> BrowserClientConfig {
        BrowserClientConfig {
            auth: BrowserAuthConfig {
                client_id: self.client_id.clone(),
                authority: self.authority(),
                redirect_uri: self.redirect_uri.clone(),
            },
            cache: BrowserCacheConfig {
                cache_location: "sessionStorage",
                store_auth_state_in_cookie: false,
            },
            login_request: LoginRequest {
                scopes: LOGIN_SCOPES.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

/// Server-side check of an identity assertion before a session is minted
#[async_trait]
pub trait AssertionVerifier: Send + Sync {
    async fn verify(&self, assertion: &IdentityAssertion) -> Result<(), AssertionError>;
}

/// Accepts every assertion; the browser flow is trusted to have verified
/// the provider token.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustUpstream;

#[async_trait]
impl AssertionVerifier for TrustUpstream {
    async fn verify(&self, _assertion: &IdentityAssertion) -> Result<(), AssertionError> {
        Ok(())
    }
}
