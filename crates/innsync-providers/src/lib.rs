//! # innsync - Provider Implementations
//!
//! Adapters for the ports defined in `innsync-domain` and
//! `innsync-application`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Cache | `CacheProvider` | Memory (bounded, insertion-ordered), Moka, Redis |
//! | Events | `EventPublisher` + `EventSubscriber` | Tokio work queue, NATS JetStream |
//! | Durable | `HotelRepository`, `UserRepository` | In-memory |
//! | Search | `SearchIndex` | In-memory, Solr |
//! | Hotel source | `HotelSource` | HTTP hotels API |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! innsync-providers = { version = "0.1", default-features = false, features = ["cache-redis"] }
//! ```

pub use innsync_domain::error::{Error, Result};

/// Provider-specific constants
pub mod constants;

/// Cache provider implementations
pub mod cache;

/// Durable store implementations
pub mod durable;

/// Change-event queue implementations
pub mod events;

/// HTTP clients for remote services
pub mod http;

/// Search index implementations
pub mod search;
