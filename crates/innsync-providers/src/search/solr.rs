//! Solr search index
//!
//! Documents are written through Solr's JSON update handler with an
//! immediate commit. Adding a document with an existing id replaces it.
//!
//! ## Example
//!
//! ```ignore
//! use innsync_providers::search::SolrSearchIndex;
//!
//! let index = SolrSearchIndex::new("http://localhost:8983", "hotels")?;
//! ```

use crate::constants::HTTP_DEFAULT_TIMEOUT;
use async_trait::async_trait;
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::SearchIndex;
use innsync_domain::Hotel;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Solr document for a hotel
#[derive(Debug, Serialize)]
struct SolrHotel<'a> {
    id: &'a str,
    name: &'a str,
    address: &'a str,
    city: &'a str,
    state: &'a str,
    rating: f64,
    amenities: &'a [String],
    description: &'a [String],
}

impl<'a> From<&'a Hotel> for SolrHotel<'a> {
    fn from(hotel: &'a Hotel) -> Self {
        Self {
            id: &hotel.id,
            name: &hotel.name,
            address: &hotel.address,
            city: &hotel.city,
            state: &hotel.state,
            rating: hotel.rating,
            amenities: &hotel.amenities,
            description: &hotel.description,
        }
    }
}

/// Search index stored in a Solr collection
#[derive(Clone)]
pub struct SolrSearchIndex {
    client: Client,
    update_url: String,
}

impl SolrSearchIndex {
    /// Create an index writing to `collection` on the Solr server at `base_url`
    pub fn new(base_url: &str, collection: &str) -> Result<Self> {
        Self::with_timeout(base_url, collection, HTTP_DEFAULT_TIMEOUT)
    }

    /// Create with a custom request timeout
    pub fn with_timeout(base_url: &str, collection: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            Error::infrastructure_with_source(format!("Failed to build HTTP client: {e}"), e)
        })?;

        Ok(Self {
            client,
            update_url: format!(
                "{}/solr/{}/update?commit=true",
                base_url.trim_end_matches('/'),
                collection
            ),
        })
    }

    async fn post<B: Serialize + Sync + ?Sized>(&self, body: &B, action: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.update_url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::network_with_source(format!("Solr {action} failed: {e}"), e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::network(format!(
                "Solr {action} returned {status}: {detail}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchIndex for SolrSearchIndex {
    async fn upsert(&self, hotel: &Hotel) -> Result<()> {
        self.post(&[SolrHotel::from(hotel)], "add").await?;
        debug!(hotel_id = %hotel.id, "Solr document added");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.post(&serde_json::json!({ "delete": { "id": id } }), "delete")
            .await?;
        debug!(hotel_id = id, "Solr document deleted");
        Ok(())
    }
}

impl std::fmt::Debug for SolrSearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolrSearchIndex")
            .field("update_url", &self.update_url)
            .finish()
    }
}
