//! # innsync - Domain Layer
//!
//! Core types shared by every other crate in the workspace:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`entities`] | `Hotel`, `HotelPatch`, `User`, `UserUpdate`, `LoginResponse`, `ChangeEvent` |
//! | [`error`] | Error taxonomy (`Error`, `Result`) |
//! | [`ports`] | Traits implemented by adapters (caches, durable stores, search index, broker) |
//! | [`constants`] | Key prefixes and defaults |
//!
//! The domain crate has no runtime dependencies beyond serialization and
//! error derivation. Adapters live in `innsync-providers`.

/// Key prefixes and shared default values
pub mod constants;

/// Domain entities
pub mod entities;

/// Error handling types
pub mod error;

/// Port traits
pub mod ports;

pub use entities::{
    CacheableRecord, ChangeEvent, Hotel, HotelDraft, HotelPatch, LoginResponse, NewUser,
    Operation, User, UserUpdate,
};
pub use error::{Error, Result};
