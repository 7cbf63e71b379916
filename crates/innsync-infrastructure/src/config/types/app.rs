//! Application configuration root

use super::{AuthConfig, CacheConfig, EventBusConfig, HotelsApiConfig, LoggingConfig, SearchConfig};
use serde::{Deserialize, Serialize};

/// Complete application configuration
///
/// Every section falls back to its defaults, so a configuration file only
/// needs the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging output
    pub logging: LoggingConfig,

    /// Cache tiers
    pub cache: CacheConfig,

    /// Change-event channel
    pub event_bus: EventBusConfig,

    /// Search index the reindexer writes to
    pub search: SearchConfig,

    /// Hotels API the reindexer reads from
    pub hotels_api: HotelsApiConfig,

    /// Login tokens
    pub auth: AuthConfig,
}
