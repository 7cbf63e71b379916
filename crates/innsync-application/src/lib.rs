//! # innsync - Application Layer
//!
//! Orchestrates the storage tiers defined as ports in `innsync-domain`:
//!
//! - [`tiering`]: typed cache tiers over cache providers and the ordered
//!   tier chain implementing read-through and write-through propagation
//! - [`use_cases`]: `HotelService`, `UserService` and the `Reindexer`
//! - [`ports`]: consumer-side ports of the change-event channel
//!
//! Adapters are never constructed here; they are passed in as
//! `Arc<dyn Port>` handles.

/// Consumer-side event ports
pub mod ports;

/// Cache tiers and tier chains
pub mod tiering;

/// Access services and the reindexer
pub mod use_cases;

pub use tiering::{BackfillPolicy, ProviderTier, TierChain, UpdateFallback};
pub use use_cases::{HotelService, ReconcileOutcome, Reindexer, UserService};
