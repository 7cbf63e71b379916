//! Hotel source backed by the hotels HTTP API
//!
//! `GET {base_url}/hotels/{id}`: 200 yields the hotel, 404 means the hotel
//! no longer exists, anything else is a transport failure.

use crate::constants::HTTP_DEFAULT_TIMEOUT;
use async_trait::async_trait;
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::HotelSource;
use innsync_domain::Hotel;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Reads canonical hotels from the hotels API
#[derive(Clone)]
pub struct HttpHotelSource {
    client: Client,
    base_url: String,
}

impl HttpHotelSource {
    /// Create a source for the API at `base_url` (e.g. "http://hotels-api:8081")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, HTTP_DEFAULT_TIMEOUT)
    }

    /// Create with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            Error::infrastructure_with_source(format!("Failed to build HTTP client: {e}"), e)
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HotelSource for HttpHotelSource {
    async fn fetch(&self, id: &str) -> Result<Option<Hotel>> {
        let url = format!("{}/hotels/{id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::network_with_source(format!("GET {url} failed: {e}"), e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let hotel = response.json::<Hotel>().await.map_err(|e| {
                    Error::network_with_source(format!("Invalid hotel payload from {url}: {e}"), e)
                })?;
                Ok(Some(hotel))
            }
            status => Err(Error::network(format!("GET {url} returned {status}"))),
        }
    }
}

impl std::fmt::Debug for HttpHotelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpHotelSource")
            .field("base_url", &self.base_url)
            .finish()
    }
}
