//! Durable store ports
//!
//! The durable store is the source of truth. Its errors are returned to
//! callers unchanged; `NotFound` must be reported as [`Error::NotFound`].
//!
//! [`Error::NotFound`]: crate::error::Error::NotFound

use crate::entities::{Hotel, HotelDraft, HotelPatch, User};
use crate::error::Result;
use async_trait::async_trait;

/// Durable store for hotels
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Fetch a hotel by id
    async fn get_by_id(&self, id: &str) -> Result<Option<Hotel>>;

    /// Store a new hotel and return its assigned id
    async fn create(&self, draft: &HotelDraft) -> Result<String>;

    /// Merge `patch` into the stored hotel and return the merged record
    ///
    /// # Errors
    /// `NotFound` when no hotel has this id.
    async fn update(&self, id: &str, patch: &HotelPatch) -> Result<Hotel>;

    /// Remove a hotel
    ///
    /// # Errors
    /// `NotFound` when no hotel has this id.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Durable store for accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored account
    async fn list(&self) -> Result<Vec<User>>;

    /// Fetch an account by id
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Fetch an account by username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Store a new account and return its assigned id
    ///
    /// # Errors
    /// `AlreadyExists` when the username is taken.
    async fn create(&self, user: &User) -> Result<i64>;

    /// Replace a stored account
    ///
    /// # Errors
    /// `NotFound` when no account has this id.
    async fn update(&self, user: &User) -> Result<()>;

    /// Remove an account
    ///
    /// # Errors
    /// `NotFound` when no account has this id.
    async fn delete(&self, id: i64) -> Result<()>;
}
