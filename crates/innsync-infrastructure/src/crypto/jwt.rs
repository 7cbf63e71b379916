//! Login tokens signed with HS256

use crate::config::AuthConfig;
use crate::error_ext::ErrorContext;
use chrono::Utc;
use innsync_domain::User;
use innsync_domain::error::Result;
use innsync_domain::ports::Tokenizer;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Login name
    pub username: String,
    /// Account role
    pub role: String,
    /// Issued at (seconds since the epoch)
    pub iat: u64,
    /// Expiration (seconds since the epoch)
    pub exp: u64,
}

/// Issues and validates HS256 login tokens
#[derive(Clone)]
pub struct JwtTokenizer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtTokenizer {
    /// Create a tokenizer signing with `secret`; tokens expire after `ttl`
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Create from the auth configuration section
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl())
    }

    /// Decode `token`, checking signature and expiry
    pub fn validate(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .auth_context("Invalid token")?;
        Ok(data.claims)
    }
}

impl Tokenizer for JwtTokenizer {
    fn issue(&self, user: &User) -> Result<String> {
        let iat = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role.clone(),
            iat,
            exp: iat + self.ttl.as_secs(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .auth_context("Failed to sign token")
    }
}

impl std::fmt::Debug for JwtTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenizer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
