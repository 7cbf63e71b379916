//! Port traits
//!
//! Every external dependency of the tiered access layer is reached through
//! one of these traits. Implementations live in `innsync-providers`; test
//! doubles implement them directly.

/// Key/value cache backends
pub mod cache;
/// Change-event publishing
pub mod events;
/// Durable source-of-truth stores
pub mod repository;
/// Search index and canonical hotel source used by the reindexer
pub mod search;
/// Password hashing and token issuing
pub mod security;
/// Typed cache tiers
pub mod tier;

pub use cache::{CacheEntryConfig, CacheProvider, CacheStats};
pub use events::EventPublisher;
pub use repository::{HotelRepository, UserRepository};
pub use search::{HotelSource, SearchIndex};
pub use security::{PasswordHasher, Tokenizer};
pub use tier::CacheTier;
