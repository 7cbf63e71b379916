//! Reindexer ports

use crate::entities::Hotel;
use crate::error::Result;
use async_trait::async_trait;

/// Full-text index of hotels
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Insert or replace the document with the hotel's id
    async fn upsert(&self, hotel: &Hotel) -> Result<()>;

    /// Remove the document with this id; absent documents are not an error
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Canonical read of a hotel, as seen through the hotel service
#[async_trait]
pub trait HotelSource: Send + Sync {
    /// Fetch the current hotel, `None` when it no longer exists
    async fn fetch(&self, id: &str) -> Result<Option<Hotel>>;
}
