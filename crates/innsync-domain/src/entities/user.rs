//! Account records

use crate::constants::{USER_CACHE_NAMESPACE, USER_KEY_BY_ID, USER_KEY_BY_USERNAME};
use crate::entities::record::CacheableRecord;
use serde::{Deserialize, Serialize};

/// A stored account
///
/// `password` always holds a one-way hash once the record has been written
/// by the user service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    /// Identifier assigned by the durable store (`0` means unset)
    pub id: i64,
    /// Unique login name
    pub username: String,
    /// Password hash
    pub password: String,
    /// Account role
    #[serde(default, alias = "tipo")]
    pub role: String,
}

impl User {
    /// Cache key for a user id
    pub fn id_key(id: i64) -> String {
        format!("{USER_CACHE_NAMESPACE}:{USER_KEY_BY_ID}:{id}")
    }

    /// Cache key for a username
    pub fn username_key(username: &str) -> String {
        format!("{USER_CACHE_NAMESPACE}:{USER_KEY_BY_USERNAME}:{username}")
    }
}

impl CacheableRecord for User {
    const KIND: &'static str = "user";

    fn cache_keys(&self) -> Vec<String> {
        vec![Self::id_key(self.id), Self::username_key(&self.username)]
    }
}

/// Input for account creation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    /// Plain-text password, hashed before it reaches any tier
    pub password: String,
    #[serde(default)]
    pub role: String,
}

/// Input for account update
///
/// The role is never changed by an update. When `password` is `None` the
/// stored hash is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub username: String,
    pub token: String,
    pub role: String,
}
