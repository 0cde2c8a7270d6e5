//! Session issuance after the provider login completes

use axum::{body::Bytes, extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use gk_auth::{IdentityAssertion, Redirection};
use serde::Serialize;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct IssuedResponse {
    pub success: bool,
}

/// POST /auth/callback
///
/// The body is parsed by hand so a missing field and an unreadable body
/// map to different errors.
pub async fn issue_session(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> ApiResult<(CookieJar, Json<IssuedResponse>)> {
    let assertion = IdentityAssertion::from_slice(&body)?;
    state.verifier.verify(&assertion).await?;

    let claims = assertion.claims();
    let token = state.session.codec.encode(&claims, state.session_ttl)?;
    info!(user_id = %claims.id, "Session issued");

    let cookie = state.session.cookies.build_cookie(token.into_inner());
    Ok((jar.add(cookie), Json(IssuedResponse { success: true })))
}

/// GET /auth/callback
///
/// Placeholder for a provider-initiated redirect flow: send the browser on
/// to the landing page.
pub async fn redirect_to_landing(State(state): State<AppState>) -> Redirection {
    Redirection::see_other(state.access.landing_path.clone())
}
