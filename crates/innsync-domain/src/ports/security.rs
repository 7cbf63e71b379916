//! Credential ports used by account operations

use crate::entities::User;
use crate::error::Result;

/// One-way password hashing
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain-text password
    fn hash(&self, password: &str) -> Result<String>;

    /// Check a plain-text password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Issues session tokens for authenticated users
pub trait Tokenizer: Send + Sync {
    /// Issue a token for `user`
    fn issue(&self, user: &User) -> Result<String>;
}
