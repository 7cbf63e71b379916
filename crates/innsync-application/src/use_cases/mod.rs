//! Application use cases

/// Hotel catalog access over {primary cache, durable store}
pub mod hotel_service;
/// Search index reconciliation from change events
pub mod reindexer;
/// Account access over {primary cache, secondary cache, durable store}
pub mod user_service;

pub use hotel_service::HotelService;
pub use reindexer::{ReconcileOutcome, Reindexer};
pub use user_service::UserService;
