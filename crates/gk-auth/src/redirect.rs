//! Redirects as plain return values

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// A redirect a handler or middleware hands back instead of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub status: StatusCode,
    pub location: String,
}

impl Redirection {
    /// `303 See Other`, so the browser follows up with a GET
    pub fn see_other(location: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SEE_OTHER,
            location: location.into(),
        }
    }
}

impl IntoResponse for Redirection {
    fn into_response(self) -> Response {
        (self.status, [(LOCATION, self.location)], "Redirect").into_response()
    }
}
