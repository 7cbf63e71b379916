//! Remote service configuration types

use crate::constants::{DEFAULT_HOTELS_API_TIMEOUT_MS, DEFAULT_HOTELS_API_URL, DEFAULT_SOLR_URL};
use innsync_providers::constants::SOLR_DEFAULT_COLLECTION;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Search index implementations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// Process-local index
    #[default]
    Memory,
    /// Solr collection
    Solr,
}

/// Search index configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub provider: SearchProvider,

    /// Solr server URL
    pub solr_url: String,

    /// Solr collection holding hotels
    pub collection: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: SearchProvider::Memory,
            solr_url: DEFAULT_SOLR_URL.to_string(),
            collection: SOLR_DEFAULT_COLLECTION.to_string(),
        }
    }
}

/// Hotels API the reindexer fetches canonical hotels from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelsApiConfig {
    pub base_url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for HotelsApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HOTELS_API_URL.to_string(),
            timeout_ms: DEFAULT_HOTELS_API_TIMEOUT_MS,
        }
    }
}

impl HotelsApiConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
