//! Cache tiers and tier chains
//!
//! A [`ProviderTier`] gives a JSON [`CacheProvider`] a typed
//! [`CacheTier`] interface. A [`TierChain`] holds the cache tiers of one
//! entity family in lookup order and implements the propagation rules shared
//! by the access services.
//!
//! [`CacheProvider`]: innsync_domain::ports::CacheProvider
//! [`CacheTier`]: innsync_domain::ports::CacheTier

mod chain;
mod provider_tier;

pub use chain::{BackfillPolicy, TierChain, UpdateFallback};
pub use provider_tier::ProviderTier;
