//! Per-request identity
//!
//! The session middleware is the only place that attaches an authenticated
//! identity: the constructor is crate-private, so handlers can read the
//! identity but never forge one.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::warn;

use crate::codec::SessionClaims;

/// Identity resolved for the current request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestIdentity {
    claims: Option<SessionClaims>,
}

impl RequestIdentity {
    pub(crate) fn authenticated(claims: SessionClaims) -> Self {
        Self {
            claims: Some(claims),
        }
    }

    /// Identity for a request without a valid session
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn claims(&self) -> Option<&SessionClaims> {
        self.claims.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }

    pub fn into_claims(self) -> Option<SessionClaims> {
        self.claims
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<RequestIdentity>() {
            Some(identity) => Ok(identity.clone()),
            None => {
                warn!(path = %parts.uri.path(), "session middleware not installed, treating request as anonymous");
                Ok(RequestIdentity::anonymous())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn claims() -> SessionClaims {
        SessionClaims {
            id: "7".into(),
            name: "Grace".into(),
            email: "grace@example.com".into(),
        }
    }

    #[test]
    fn test_identity_states() {
        assert!(!RequestIdentity::anonymous().is_authenticated());

        let identity = RequestIdentity::authenticated(claims());
        assert!(identity.is_authenticated());
        assert_eq!(identity.claims(), Some(&claims()));
        assert_eq!(identity.into_claims(), Some(claims()));
    }

    #[tokio::test]
    async fn test_extract_from_extensions() {
        let mut request = Request::builder().uri("/protect").body(()).unwrap();
        request
            .extensions_mut()
            .insert(RequestIdentity::authenticated(claims()));
        let (mut parts, _) = request.into_parts();

        let identity = RequestIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(identity.claims().map(|c| c.id.as_str()), Some("7"));
    }

    #[tokio::test]
    async fn test_missing_extension_is_anonymous() {
        let (mut parts, _) = Request::builder().uri("/").body(()).unwrap().into_parts();

        let identity = RequestIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(!identity.is_authenticated());
    }
}
