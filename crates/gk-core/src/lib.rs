//! # gk-core
//!
//! Foundational pieces shared by the Gatekeeper crates:
//! - Application configuration loaded from the environment
//! - Configuration error types

pub mod config;
pub mod error;

pub use config::{AppConfig, Environment, SecretSource};
pub use error::ConfigError;
