//! Identity provider client configuration for the browser login flow

use axum::{extract::State, Json};
use gk_auth::BrowserClientConfig;

use crate::state::AppState;

/// GET /auth/config
pub async fn client_config(State(state): State<AppState>) -> Json<BrowserClientConfig> {
    Json(state.provider.browser_config())
}
