//! In-memory search index

use async_trait::async_trait;
use dashmap::DashMap;
use innsync_domain::error::Result;
use innsync_domain::ports::SearchIndex;
use innsync_domain::Hotel;

/// Search index keeping one document per hotel id
#[derive(Debug, Default)]
pub struct InMemorySearchIndex {
    documents: DashMap<String, Hotel>,
}

impl InMemorySearchIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Document indexed under `id`
    pub fn get(&self, id: &str) -> Option<Hotel> {
        self.documents.get(id).map(|entry| entry.value().clone())
    }

    /// True when a document is indexed under `id`
    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn upsert(&self, hotel: &Hotel) -> Result<()> {
        self.documents.insert(hotel.id.clone(), hotel.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.documents.remove(id);
        Ok(())
    }
}
