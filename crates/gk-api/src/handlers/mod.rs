//! Request handlers

pub mod callback;
pub mod logout;
pub mod protect;
pub mod provider;

use crate::error::ApiError;

/// Fallback for unmatched paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
