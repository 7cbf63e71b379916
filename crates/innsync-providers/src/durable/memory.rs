//! In-memory durable stores

use async_trait::async_trait;
use dashmap::DashMap;
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::{HotelRepository, UserRepository};
use innsync_domain::{Hotel, HotelDraft, HotelPatch, User};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Hotel store keyed by 24-character hex ids
#[derive(Debug, Default)]
pub struct InMemoryHotelRepository {
    hotels: DashMap<String, Hotel>,
}

impl InMemoryHotelRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored hotels
    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    /// True when no hotel is stored
    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }

    fn next_id() -> String {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(24);
        id
    }
}

#[async_trait]
impl HotelRepository for InMemoryHotelRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<Hotel>> {
        Ok(self.hotels.get(id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, draft: &HotelDraft) -> Result<String> {
        let id = Self::next_id();
        self.hotels
            .insert(id.clone(), draft.clone().into_hotel(id.clone()));
        debug!(hotel_id = %id, "hotel stored");
        Ok(id)
    }

    async fn update(&self, id: &str, patch: &HotelPatch) -> Result<Hotel> {
        let mut entry = self
            .hotels
            .get_mut(id)
            .ok_or_else(|| Error::not_found(format!("hotel {id}")))?;
        patch.apply_to(entry.value_mut());
        Ok(entry.value().clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.hotels
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("hotel {id}")))
    }
}

#[derive(Debug, Default)]
struct Users {
    by_id: BTreeMap<i64, User>,
    last_id: i64,
}

impl Users {
    fn username_taken(&self, username: &str, except: i64) -> bool {
        self.by_id
            .values()
            .any(|user| user.username == username && user.id != except)
    }
}

/// Account store with sequential numeric ids and unique usernames
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Users>,
}

impl InMemoryUserRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Users>> {
        self.users
            .read()
            .map_err(|_| Error::database("user store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Users>> {
        self.users
            .write()
            .map_err(|_| Error::database("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.read()?.by_id.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.read()?.by_id.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .read()?
            .by_id
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<i64> {
        let mut users = self.write()?;
        if users.username_taken(&user.username, 0) {
            return Err(Error::already_exists(format!("user {}", user.username)));
        }
        users.last_id += 1;
        let id = users.last_id;
        users.by_id.insert(
            id,
            User {
                id,
                ..user.clone()
            },
        );
        Ok(id)
    }

    async fn update(&self, user: &User) -> Result<()> {
        let mut users = self.write()?;
        if !users.by_id.contains_key(&user.id) {
            return Err(Error::not_found(format!("user {}", user.id)));
        }
        if users.username_taken(&user.username, user.id) {
            return Err(Error::already_exists(format!("user {}", user.username)));
        }
        users.by_id.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.write()?
            .by_id
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("user {id}")))
    }
}
