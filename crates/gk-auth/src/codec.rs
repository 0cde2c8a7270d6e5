//! Session token codec
//!
//! Session tokens are HS256 JWTs carrying the identity claims plus `iat`
//! and `exp`. Verification checks the signature before the expiry, so a
//! forged token is always reported as such even when it is also stale.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity embedded in a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Session codec errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session token signature does not match")]
    InvalidSignature,
    #[error("Session token is expired")]
    Expired,
    #[error("Malformed session token: {0}")]
    Malformed(String),
    #[error("Session token encoding failed: {0}")]
    Encoding(String),
}

impl SessionError {
    /// Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::InvalidSignature => "invalid_signature",
            SessionError::Expired => "expired",
            SessionError::Malformed(_) => "malformed",
            SessionError::Encoding(_) => "encoding",
        }
    }
}

/// Signed session token as stored in the cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire form of the token payload
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    #[serde(flatten)]
    identity: SessionClaims,
    /// Issued at (Unix timestamp)
    iat: i64,
    /// Expiration time (Unix timestamp)
    exp: i64,
}

/// Signs and verifies session tokens with a shared secret
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionCodec {
    /// Create a codec bound to the given HMAC secret
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign `claims` into a token that expires `ttl` from now
    pub fn encode(&self, claims: &SessionClaims, ttl: Duration) -> Result<SessionToken, SessionError> {
        let now = Utc::now().timestamp();
        let payload = TokenClaims {
            identity: claims.clone(),
            iat: now,
            exp: now + ttl.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map(SessionToken)
            .map_err(|e| SessionError::Encoding(e.to_string()))
    }

    /// Verify a token and return the identity it carries
    pub fn decode(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => SessionError::InvalidSignature,
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Malformed(e.to_string()),
            },
        )?;

        Ok(data.claims.identity)
    }
}

impl fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCodec").finish_non_exhaustive()
    }
}
