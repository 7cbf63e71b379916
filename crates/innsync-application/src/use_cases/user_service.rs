//! Account access service
//!
//! Accounts live in three tiers: a primary cache, a secondary (remote)
//! cache and the durable store. Compared to hotels, updates are strict:
//! every tier must already hold the account, and no change events are
//! published.

use crate::tiering::{BackfillPolicy, TierChain, UpdateFallback};
use innsync_domain::constants::{DEFAULT_USER_ROLE, INVALID_CREDENTIALS};
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::{CacheTier, PasswordHasher, Tokenizer, UserRepository};
use innsync_domain::{CacheableRecord, LoginResponse, NewUser, User, UserUpdate};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tiered access to accounts
pub struct UserService {
    chain: TierChain<User>,
    durable: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokenizer: Arc<dyn Tokenizer>,
}

impl UserService {
    /// Create a new user service
    ///
    /// # Arguments
    ///
    /// * `caches` - Cache tiers, fastest first
    /// * `durable` - Source-of-truth store
    /// * `hasher` - Password hashing
    /// * `tokenizer` - Issues login tokens
    pub fn new(
        caches: Vec<Arc<dyn CacheTier<User>>>,
        durable: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokenizer: Arc<dyn Tokenizer>,
    ) -> Self {
        Self {
            chain: TierChain::new(caches),
            durable,
            hasher,
            tokenizer,
        }
    }

    /// Cache tiers in lookup order
    pub fn chain(&self) -> &TierChain<User> {
        &self.chain
    }

    /// Every account, read from the durable store
    pub async fn list(&self) -> Result<Vec<User>> {
        self.durable.list().await
    }

    /// Read an account by id, backfilling faster tiers that missed
    pub async fn get_by_id(&self, id: i64) -> Result<User> {
        require_id(id)?;
        self.chain
            .read_through(
                "get_by_id",
                &User::id_key(id),
                BackfillPolicy::Fatal,
                self.durable.get_by_id(id),
            )
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id}")))
    }

    /// Read an account by username, backfilling faster tiers that missed
    pub async fn get_by_username(&self, username: &str) -> Result<User> {
        require_username(username)?;
        self.chain
            .read_through(
                "get_by_username",
                &User::username_key(username),
                BackfillPolicy::Fatal,
                self.durable.get_by_username(username),
            )
            .await?
            .ok_or_else(|| Error::not_found(format!("user {username}")))
    }

    /// Store a new account
    ///
    /// The password is hashed before any tier sees it.
    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        require_username(&new_user.username)?;
        if new_user.password.is_empty() {
            return Err(Error::validation("password is required"));
        }

        let mut user = User {
            id: 0,
            username: new_user.username,
            password: self.hasher.hash(&new_user.password)?,
            role: new_user.role,
        };
        user.id = self.durable.create(&user).await?;

        self.chain.create_all("create", &user).await?;

        info!(user_id = user.id, "user created");
        Ok(user)
    }

    /// Replace the username and, optionally, the password of an account
    ///
    /// Without a new password the stored hash is kept. The role is never
    /// changed. Every cache tier must already hold the account.
    pub async fn update(&self, update: UserUpdate) -> Result<User> {
        require_id(update.id)?;
        require_username(&update.username)?;

        let current = self
            .durable
            .get_by_id(update.id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {}", update.id)))?;

        let password = match update.password.as_deref() {
            Some(plain) if !plain.is_empty() => self.hasher.hash(plain)?,
            _ => current.password,
        };
        let user = User {
            id: update.id,
            username: update.username,
            password,
            role: current.role,
        };

        self.durable.update(&user).await?;
        self.chain
            .update_all("update", &user, UpdateFallback::Strict)
            .await?;

        info!(user_id = user.id, "user updated");
        Ok(user)
    }

    /// Remove an account from every tier
    ///
    /// The stored account is read first so every key it is cached under is
    /// removed, whichever of them a cache still holds. Once the durable
    /// delete succeeded the account is gone, even when the returned error
    /// reports cache tiers as failed.
    pub async fn delete(&self, id: i64) -> Result<()> {
        require_id(id)?;
        let keys = match self.durable.get_by_id(id).await? {
            Some(user) => user.cache_keys(),
            None => vec![User::id_key(id)],
        };
        self.durable.delete(id).await?;

        let failures = self.chain.delete_all("delete", &keys).await;

        info!(user_id = id, failures = failures.len(), "user deleted");
        Error::aggregate("delete", failures)
    }

    /// Authenticate and issue a token
    ///
    /// Cache warming failures are ignored. Wrong passwords and unknown
    /// usernames both yield the same `Authentication` error.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        require_username(username)?;

        let mut user = match self
            .chain
            .read_through(
                "login",
                &User::username_key(username),
                BackfillPolicy::BestEffort,
                self.durable.get_by_username(username),
            )
            .await?
        {
            Some(user) => user,
            None => {
                debug!(username, "login for unknown user");
                return Err(Error::authentication(INVALID_CREDENTIALS));
            }
        };

        if !self.hasher.verify(password, &user.password)? {
            warn!(user_id = user.id, "login rejected");
            return Err(Error::authentication(INVALID_CREDENTIALS));
        }

        if user.role.is_empty() {
            DEFAULT_USER_ROLE.clone_into(&mut user.role);
        }
        let token = self.tokenizer.issue(&user)?;

        info!(user_id = user.id, "login succeeded");
        Ok(LoginResponse {
            user_id: user.id,
            username: user.username,
            token,
            role: user.role,
        })
    }
}

fn require_id(id: i64) -> Result<()> {
    if id == 0 {
        return Err(Error::validation("user id is required"));
    }
    Ok(())
}

fn require_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(Error::validation("username is required"));
    }
    Ok(())
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}
