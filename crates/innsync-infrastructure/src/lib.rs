//! # innsync - Infrastructure Layer
//!
//! Cross-cutting technical concerns:
//!
//! - [`config`]: Figment-based configuration (defaults, TOML, environment)
//! - [`logging`]: tracing subscriber setup
//! - [`crypto`]: Argon2 password hashing and JWT login tokens
//! - [`bootstrap`]: construction of every adapter and service from config
//! - [`error_ext`]: context helpers for foreign errors

/// Application wiring
pub mod bootstrap;
/// Configuration management
pub mod config;
/// Infrastructure constants
pub mod constants;
/// Password hashing and login tokens
pub mod crypto;
/// Error context helpers
pub mod error_ext;
/// Structured logging
pub mod logging;

pub use bootstrap::{AppContext, EventChannel};
pub use config::{AppConfig, ConfigLoader};
pub use logging::init_logging;
