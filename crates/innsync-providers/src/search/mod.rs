//! Search index implementations

pub mod memory;
pub mod solr;

pub use memory::InMemorySearchIndex;
pub use solr::SolrSearchIndex;
