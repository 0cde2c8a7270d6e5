//! # gk-api
//!
//! HTTP surface of Gatekeeper: session issuance, logout, the protected
//! landing page and the identity provider client configuration.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
