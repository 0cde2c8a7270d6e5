//! Configuration types and loading
//!
//! All settings come from the process environment and are read once at
//! startup. After that the configuration is immutable and shared.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// Signing secret used when `COOKIE_SECRET` is unset outside production.
pub const DEFAULT_COOKIE_SECRET: &str = "default-secret";

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,

    /// Listener configuration
    pub server: ServerConfig,

    /// Session cookie and token settings
    pub session: SessionConfig,

    /// Path rules for the access gate and redirects
    pub access: AccessConfig,

    /// Identity provider client settings handed to the browser login flow
    pub identity_provider: IdentityProviderConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Name of the session cookie
    pub cookie_name: String,
    /// HMAC secret for session tokens; never serialized
    #[serde(skip_serializing, default)]
    pub cookie_secret: Option<String>,
    /// Token and cookie lifetime in seconds
    pub ttl_seconds: i64,
}

/// Where the signing secret came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    Configured,
    Fallback,
}

impl SessionConfig {
    /// The secret to sign with, falling back to [`DEFAULT_COOKIE_SECRET`].
    pub fn signing_secret(&self) -> (&str, SecretSource) {
        match self.cookie_secret.as_deref() {
            Some(secret) => (secret, SecretSource::Configured),
            None => (DEFAULT_COOKIE_SECRET, SecretSource::Fallback),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccessConfig {
    /// Requests whose path starts with this prefix require a session
    pub protected_prefix: String,
    /// Where unauthenticated requests are sent
    pub login_path: String,
    /// Landing page after a provider-initiated callback
    pub landing_path: String,
    /// Where logout sends the browser
    pub home_path: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IdentityProviderConfig {
    pub client_id: Option<String>,
    /// Azure AD tenant ID
    pub tenant_id: Option<String>,
    pub redirect_uri: Option<String>,
}

impl IdentityProviderConfig {
    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.tenant_id.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            session: SessionConfig {
                cookie_name: "session".to_string(),
                cookie_secret: None,
                ttl_seconds: 60 * 60 * 24, // 24 hours
            },
            access: AccessConfig {
                protected_prefix: "/protected".to_string(),
                login_path: "/login".to_string(),
                landing_path: "/protect".to_string(),
                home_path: "/".to_string(),
            },
            identity_provider: IdentityProviderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(env) = var("APP_ENV").or_else(|| var("NODE_ENV")) {
            config.environment = Environment::parse(&env);
        }

        // Server
        if let Some(host) = var("HOST") {
            config.server.host = host;
        }
        if let Some(port) = var("PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: format!("expected a port number, got {port:?}"),
            })?;
        }

        // Session
        config.session.cookie_secret = var("COOKIE_SECRET");
        if config.session.cookie_secret.is_none() {
            if config.environment.is_production() {
                return Err(ConfigError::MissingEnvVar("COOKIE_SECRET".to_string()));
            }
            warn!("COOKIE_SECRET is not set, signing sessions with the built-in development secret");
        }

        // Identity provider, also accepting the browser build's variable names
        let provider_var = |key: &str| var(key).or_else(|| var(&format!("VITE_{key}")));
        config.identity_provider = IdentityProviderConfig {
            client_id: provider_var("AZURE_CLIENT_ID"),
            tenant_id: provider_var("AZURE_TENANT_ID"),
            redirect_uri: provider_var("AZURE_REDIRECT_URI"),
        };

        Ok(config)
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        SocketAddr::new(ip, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.session.cookie_name, "session");
        assert_eq!(config.session.ttl_seconds, 86400);
        assert_eq!(config.access.protected_prefix, "/protected");
        assert!(!config.environment.is_production());
    }

    #[test]
    fn test_secret_from_env() {
        let config = load(&[("COOKIE_SECRET", "s3cret")]).unwrap();
        assert_eq!(
            config.session.signing_secret(),
            ("s3cret", SecretSource::Configured)
        );
    }

    #[test]
    fn test_development_falls_back_to_default_secret() {
        let config = load(&[("COOKIE_SECRET", "  ")]).unwrap();
        assert_eq!(
            config.session.signing_secret(),
            (DEFAULT_COOKIE_SECRET, SecretSource::Fallback)
        );
    }

    #[test]
    fn test_production_requires_secret() {
        let err = load(&[("APP_ENV", "production")]).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("COOKIE_SECRET".to_string()));

        let config = load(&[("NODE_ENV", "production"), ("COOKIE_SECRET", "x")]).unwrap();
        assert!(config.environment.is_production());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn test_identity_provider_vite_fallback() {
        let config = load(&[
            ("VITE_AZURE_CLIENT_ID", "client"),
            ("AZURE_TENANT_ID", "tenant"),
        ])
        .unwrap();
        assert_eq!(config.identity_provider.client_id.as_deref(), Some("client"));
        assert_eq!(config.identity_provider.tenant_id.as_deref(), Some("tenant"));
        assert!(config.identity_provider.redirect_uri.is_none());
        assert!(config.identity_provider.is_configured());
    }

    #[test]
    fn test_server_addr() {
        let config = load(&[("HOST", "127.0.0.1"), ("PORT", "3000")]).unwrap();
        let addr = config.server_addr();
        assert_eq!(addr.port(), 3000);
        assert!(addr.ip().is_loopback());
    }
}
