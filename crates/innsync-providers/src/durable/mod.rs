//! Durable store implementations
//!
//! In-memory stores honouring the repository contracts: id assignment on
//! create, `NotFound` on update and delete of missing records, unique
//! usernames. Used for local runs and as the durable tier in tests.

pub mod memory;

pub use memory::{InMemoryHotelRepository, InMemoryUserRepository};
