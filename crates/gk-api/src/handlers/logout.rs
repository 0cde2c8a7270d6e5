//! Logout

use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use gk_auth::{Redirection, RequestIdentity};
use tracing::info;

use crate::state::AppState;

/// GET /logout
///
/// Always expires the session cookie and sends the browser home. The
/// request identity is dropped with the request.
pub async fn logout(
    State(state): State<AppState>,
    identity: RequestIdentity,
    jar: CookieJar,
) -> (CookieJar, Redirection) {
    if let Some(claims) = identity.claims() {
        info!(user_id = %claims.id, "Session ended");
    }

    (
        jar.add(state.session.cookies.expired_cookie()),
        Redirection::see_other(state.access.home_path.clone()),
    )
}
