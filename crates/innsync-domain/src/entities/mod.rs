//! Domain entities
//!
//! Records handled by the tiered access services and the change events
//! exchanged with the reindexer.

/// Change events published after hotel mutations
pub mod event;
/// Hotel catalog records
pub mod hotel;
/// Cache addressing of records
pub mod record;
/// Account records
pub mod user;

pub use event::{ChangeEvent, Operation};
pub use hotel::{Hotel, HotelDraft, HotelPatch};
pub use record::CacheableRecord;
pub use user::{LoginResponse, NewUser, User, UserUpdate};
