//! API error handling
//!
//! Errors render as `{"error": message}` JSON bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gk_auth::{AssertionError, SessionError};
use serde::Serialize;
use tracing::{error, warn};

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// `idToken` or `account` absent from the issuance request
    MissingAssertionData,
    /// The assertion verifier refused the identity
    AssertionRejected(String),
    /// Unexpected fault while minting a session
    IssuanceFailed(String),
    NotFound,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingAssertionData => StatusCode::BAD_REQUEST,
            ApiError::AssertionRejected(_) => StatusCode::UNAUTHORIZED,
            ApiError::IssuanceFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Message shown to the caller; internal details stay in the logs
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::MissingAssertionData => "Missing required data",
            ApiError::AssertionRejected(_) | ApiError::IssuanceFailed(_) => "Authentication failed",
            ApiError::NotFound => "Not found",
        }
    }
}

impl From<AssertionError> for ApiError {
    fn from(err: AssertionError) -> Self {
        match err {
            AssertionError::MissingData => ApiError::MissingAssertionData,
            AssertionError::Rejected(reason) => ApiError::AssertionRejected(reason),
            AssertionError::Malformed(detail) => ApiError::IssuanceFailed(detail),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::IssuanceFailed(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::IssuanceFailed(detail) => error!(error = %detail, "Auth callback error"),
            ApiError::AssertionRejected(reason) => warn!(reason = %reason, "Identity assertion rejected"),
            _ => {}
        }

        let body = ErrorBody {
            error: self.message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_error_mapping() {
        assert!(matches!(
            ApiError::from(AssertionError::MissingData),
            ApiError::MissingAssertionData
        ));
        assert!(matches!(
            ApiError::from(AssertionError::Malformed("eof".into())),
            ApiError::IssuanceFailed(_)
        ));
        assert_eq!(
            ApiError::from(AssertionError::Rejected("nope".into())).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let err = ApiError::from(SessionError::Encoding("key failure".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Authentication failed");
    }
}
