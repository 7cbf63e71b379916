//! Provider-specific constants

use std::time::Duration;

// ============================================================================
// Cache
// ============================================================================

/// Default maximum number of entries in the in-memory cache
pub const CACHE_DEFAULT_MAX_SIZE: usize = 100_000;

/// Default number of entries pruned when the in-memory cache overflows
pub const CACHE_DEFAULT_ITEMS_TO_PRUNE: usize = 100;

/// Default expiry of cache entries
pub const CACHE_DEFAULT_TTL: Duration = Duration::from_secs(30);

// ============================================================================
// Events
// ============================================================================

/// Default capacity of the in-process work queue
pub const EVENT_QUEUE_DEFAULT_CAPACITY: usize = 1024;

/// Default number of redeliveries after a failed handling
pub const EVENT_QUEUE_DEFAULT_MAX_REDELIVERIES: u32 = 5;

/// Default number of events handled concurrently
pub const EVENT_QUEUE_DEFAULT_CONCURRENCY: usize = 8;

/// Default pause before a failed event is redelivered
pub const EVENT_QUEUE_DEFAULT_REDELIVERY_DELAY: Duration = Duration::from_millis(250);

/// Default JetStream stream name
pub const NATS_DEFAULT_STREAM: &str = "HOTELS_NEWS";

/// Default durable consumer name
pub const NATS_DEFAULT_CONSUMER: &str = "reindexer";

/// Time JetStream waits for an ack before redelivering
pub const NATS_CONSUMER_ACK_WAIT: Duration = Duration::from_secs(30);

// ============================================================================
// HTTP
// ============================================================================

/// Default timeout of outgoing HTTP requests
pub const HTTP_DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default Solr collection holding hotels
pub const SOLR_DEFAULT_COLLECTION: &str = "hotels";
