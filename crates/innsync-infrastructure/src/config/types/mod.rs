//! Configuration types module

pub mod app;
pub mod auth;
pub mod cache;
pub mod event_bus;
pub mod logging;
pub mod services;

pub use app::AppConfig;
pub use auth::AuthConfig;
pub use cache::{
    CacheConfig, PrimaryCacheConfig, PrimaryCacheProvider, SecondaryCacheConfig,
    SecondaryCacheProvider,
};
pub use event_bus::{EventBusConfig, EventBusProvider};
pub use logging::LoggingConfig;
pub use services::{HotelsApiConfig, SearchConfig, SearchProvider};
