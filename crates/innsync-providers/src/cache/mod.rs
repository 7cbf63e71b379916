//! Cache provider implementations
//!
//! | Provider | Feature | Use |
//! |----------|---------|-----|
//! | [`MemoryCacheProvider`] | always | primary tier; insertion-ordered batch pruning |
//! | `MokaCacheProvider` | `cache-moka` | alternative primary tier |
//! | `RedisCacheProvider` | `cache-redis` | secondary tier shared between instances |

pub mod memory;
#[cfg(feature = "cache-moka")]
pub mod moka;
#[cfg(feature = "cache-redis")]
pub mod redis;

pub use memory::MemoryCacheProvider;
#[cfg(feature = "cache-moka")]
pub use moka::MokaCacheProvider;
#[cfg(feature = "cache-redis")]
pub use redis::RedisCacheProvider;
