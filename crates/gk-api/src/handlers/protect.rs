//! Protected landing page

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gk_auth::{Redirection, RequestIdentity, SessionClaims};
use serde::Serialize;

use crate::state::AppState;

/// Result of loading a page: its data, or somewhere else to go
#[derive(Debug)]
pub enum PageLoad<T> {
    Data(T),
    Redirect(Redirection),
}

impl<T: Serialize> IntoResponse for PageLoad<T> {
    fn into_response(self) -> Response {
        match self {
            PageLoad::Data(data) => Json(data).into_response(),
            PageLoad::Redirect(redirect) => redirect.into_response(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProtectPage {
    pub user: SessionClaims,
}

/// GET /protect
pub async fn load(State(state): State<AppState>, identity: RequestIdentity) -> PageLoad<ProtectPage> {
    match identity.into_claims() {
        Some(user) => PageLoad::Data(ProtectPage { user }),
        None => PageLoad::Redirect(Redirection::see_other(state.access.login_path.clone())),
    }
}
