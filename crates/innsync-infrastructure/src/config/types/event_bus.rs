//! Change-event channel configuration types

use crate::constants::DEFAULT_NATS_URL;
use innsync_domain::constants::DEFAULT_EVENT_QUEUE;
use innsync_providers::constants::{
    EVENT_QUEUE_DEFAULT_CAPACITY, EVENT_QUEUE_DEFAULT_CONCURRENCY,
    EVENT_QUEUE_DEFAULT_MAX_REDELIVERIES, NATS_DEFAULT_CONSUMER, NATS_DEFAULT_STREAM,
};
use serde::{Deserialize, Serialize};

/// EventBus provider types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventBusProvider {
    /// In-process work queue (Tokio) - default, single process only
    #[default]
    Tokio,
    /// NATS JetStream work queue (feature `events-nats`)
    Nats,
}

/// EventBus configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// EventBus provider to use
    pub provider: EventBusProvider,

    /// Events buffered by the in-process queue before publishers wait
    pub capacity: usize,

    /// NATS server URL
    pub nats_url: String,

    /// Subject events are published on
    pub subject: String,

    /// JetStream stream capturing the subject
    pub stream: String,

    /// Durable consumer shared by reindexer instances
    pub consumer: String,

    /// Redeliveries after a failed handling before the event is dropped
    pub max_redeliveries: u32,

    /// Events handled concurrently by one consumer
    pub concurrency: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            provider: EventBusProvider::Tokio,
            capacity: EVENT_QUEUE_DEFAULT_CAPACITY,
            nats_url: DEFAULT_NATS_URL.to_string(),
            subject: DEFAULT_EVENT_QUEUE.to_string(),
            stream: NATS_DEFAULT_STREAM.to_string(),
            consumer: NATS_DEFAULT_CONSUMER.to_string(),
            max_redeliveries: EVENT_QUEUE_DEFAULT_MAX_REDELIVERIES,
            concurrency: EVENT_QUEUE_DEFAULT_CONCURRENCY,
        }
    }
}

impl EventBusConfig {
    /// Create config for NATS
    pub fn nats(url: impl Into<String>) -> Self {
        Self {
            provider: EventBusProvider::Nats,
            nats_url: url.into(),
            ..Default::default()
        }
    }
}
