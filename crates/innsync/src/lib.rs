//! # innsync
//!
//! Tiered access to hotels and accounts over fast caches and a durable
//! store, with a change-event pipeline keeping a search index in sync.
//!
//! ## Example
//!
//! ```ignore
//! use innsync::infrastructure::{AppConfig, AppContext};
//!
//! let ctx = AppContext::build(AppConfig::default()).await?;
//! let hotel = ctx.hotels.get_by_id("65f0c0ffee0000000000beef").await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - entities, error taxonomy and ports
//! - `application` - tier chains, access services and the reindexer
//! - `providers` - cache, queue, store and search adapters
//! - `infrastructure` - configuration, logging, crypto and wiring

/// Domain layer - entities, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use innsync_domain::*;
}

/// Application layer - services and tier chains
pub mod application {
    pub use innsync_application::*;
}

/// Provider implementations
pub mod providers {
    pub use innsync_providers::*;
}

/// Infrastructure layer - config, logging and wiring
pub mod infrastructure {
    pub use innsync_infrastructure::*;
}

/// Command line interface of the `innsync` binary
pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::{HotelService, Reindexer, UserService};
pub use infrastructure::{AppConfig, AppContext, ConfigLoader};
