//! API routes
//!
//! Every request, including unmatched ones, passes the session middleware
//! and then the access gate before reaching a handler.

use axum::{middleware, routing::get, Router};
use gk_auth::{access_gate, session_middleware};
use tower::ServiceBuilder;

use crate::handlers::{callback, logout, not_found, protect, provider};
use crate::state::AppState;

/// Create the complete router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/auth/callback",
            get(callback::redirect_to_landing).post(callback::issue_session),
        )
        .route("/auth/config", get(provider::client_config))
        .route("/logout", get(logout::logout))
        .route("/protect", get(protect::load))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn_with_state(
                    state.session.clone(),
                    session_middleware,
                ))
                .layer(middleware::from_fn_with_state(state.gate.clone(), access_gate)),
        )
        .with_state(state)
}
