//! Change-event queue implementations
//!
//! Each queue implements both sides of the channel: [`EventPublisher`] for
//! the access services and [`EventSubscriber`] for the reindexer. Both give
//! work-queue semantics: every accepted event is handled by exactly one
//! consumer and redelivered when the handler fails.
//!
//! [`EventPublisher`]: innsync_domain::ports::EventPublisher
//! [`EventSubscriber`]: innsync_application::ports::EventSubscriber

#[cfg(feature = "events-nats")]
pub mod nats;
pub mod tokio;

#[cfg(feature = "events-nats")]
pub use nats::{NatsEventQueue, NatsQueueConfig};
pub use self::tokio::TokioEventQueue;
