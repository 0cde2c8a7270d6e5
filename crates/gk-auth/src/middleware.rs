//! Session middleware
//!
//! Resolves the `session` cookie into a [`RequestIdentity`] for every
//! request. It never rejects: enforcement belongs to the access gate.
//! A cookie that fails verification is removed from the browser so the
//! same bad token is not re-verified on every request.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::codec::SessionCodec;
use crate::cookie::CookieConfig;
use crate::identity::RequestIdentity;

/// Shared state for the session middleware
#[derive(Debug, Clone)]
pub struct SessionAuth {
    pub codec: Arc<SessionCodec>,
    pub cookies: CookieConfig,
}

impl SessionAuth {
    pub fn new(codec: SessionCodec, cookies: CookieConfig) -> Self {
        Self {
            codec: Arc::new(codec),
            cookies,
        }
    }

    /// Resolve the request cookies into an identity.
    ///
    /// Returns the identity and whether the stored cookie must be cleared.
    pub fn resolve(&self, jar: &CookieJar) -> (RequestIdentity, bool) {
        let Some(cookie) = jar.get(&self.cookies.name) else {
            return (RequestIdentity::anonymous(), false);
        };

        match self.codec.decode(cookie.value()) {
            Ok(claims) => (RequestIdentity::authenticated(claims), false),
            Err(err) => {
                debug!(reason = err.kind(), error = %err, "Discarding unverifiable session cookie");
                (RequestIdentity::anonymous(), true)
            }
        }
    }
}

/// Session middleware
pub async fn session_middleware(
    State(auth): State<SessionAuth>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let (identity, clear_cookie) = auth.resolve(&jar);
    request.extensions_mut().insert(identity);

    let response = next.run(request).await;

    // A cookie written by the handler supersedes the removal.
    if clear_cookie && !auth.cookies.is_set_in(response.headers()) {
        return (jar.remove(auth.cookies.removal_cookie()), response).into_response();
    }

    response
}
