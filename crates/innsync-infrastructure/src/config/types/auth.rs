//! Login token configuration types

use crate::constants::{DEFAULT_JWT_SECRET, DEFAULT_TOKEN_TTL_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Login token configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC key signing issued tokens
    pub jwt_secret: String,

    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

impl AuthConfig {
    /// Token lifetime
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// True while the development key is in use
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}
