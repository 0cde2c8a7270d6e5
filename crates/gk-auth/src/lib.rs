//! # gk-auth
//!
//! Session authentication for Gatekeeper.
//!
//! ## Features
//!
//! - Signed, time-limited session tokens (HS256 JWT)
//! - Session cookie attributes
//! - Session middleware resolving the cookie into a request identity
//! - Access gate redirecting anonymous requests away from protected paths
//! - Identity provider client settings and assertion verification hook

pub mod assertion;
pub mod codec;
pub mod cookie;
pub mod gate;
pub mod identity;
pub mod middleware;
pub mod provider;
pub mod redirect;

pub use assertion::{AccountInfo, AssertionError, IdentityAssertion};
pub use codec::{SessionClaims, SessionCodec, SessionError, SessionToken};
pub use cookie::CookieConfig;
pub use gate::{access_gate, AccessGate, GateDecision};
pub use identity::RequestIdentity;
pub use middleware::{session_middleware, SessionAuth};
pub use provider::{AssertionVerifier, BrowserClientConfig, IdentityProviderClient, TrustUpstream};
pub use redirect::Redirection;
