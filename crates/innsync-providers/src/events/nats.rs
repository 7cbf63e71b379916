//! NATS JetStream work queue
//!
//! Events are published to a JetStream stream with work-queue retention and
//! consumed through a durable pull consumer with explicit acks:
//!
//! - handler success: ack
//! - handler failure: nak, JetStream redelivers up to `max_deliver` times
//! - undecodable payload: term, the message is never redelivered
//!
//! Publishing waits for the JetStream ack, so a successful publish means
//! the stream stored the event.

use crate::constants::{
    EVENT_QUEUE_DEFAULT_CONCURRENCY, EVENT_QUEUE_DEFAULT_MAX_REDELIVERIES, NATS_CONSUMER_ACK_WAIT,
    NATS_DEFAULT_CONSUMER, NATS_DEFAULT_STREAM,
};
use async_nats::jetstream::{self, AckKind};
use async_trait::async_trait;
use futures::StreamExt;
use innsync_application::ports::{ChangeEventHandler, EventSubscriber};
use innsync_domain::constants::DEFAULT_EVENT_QUEUE;
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::EventPublisher;
use innsync_domain::ChangeEvent;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Connection settings of a [`NatsEventQueue`]
#[derive(Debug, Clone)]
pub struct NatsQueueConfig {
    /// NATS server URL (e.g. "nats://localhost:4222")
    pub url: String,
    /// Subject events are published to
    pub subject: String,
    /// JetStream stream capturing the subject
    pub stream: String,
    /// Durable consumer shared by all reindexer instances
    pub consumer: String,
    /// Redeliveries allowed after the first failed handling
    pub max_redeliveries: u32,
    /// Messages handled concurrently
    pub concurrency: usize,
}

impl NatsQueueConfig {
    /// Defaults for the hotels change queue on `url`
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            subject: DEFAULT_EVENT_QUEUE.to_string(),
            stream: NATS_DEFAULT_STREAM.to_string(),
            consumer: NATS_DEFAULT_CONSUMER.to_string(),
            max_redeliveries: EVENT_QUEUE_DEFAULT_MAX_REDELIVERIES,
            concurrency: EVENT_QUEUE_DEFAULT_CONCURRENCY,
        }
    }
}

/// Change-event work queue on NATS JetStream
pub struct NatsEventQueue {
    jetstream: jetstream::Context,
    config: NatsQueueConfig,
}

impl NatsEventQueue {
    /// Connect and make sure the stream exists
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or the stream cannot be
    /// created.
    pub async fn connect(config: NatsQueueConfig) -> Result<Self> {
        info!("Connecting to NATS server at {}", config.url);

        let client = async_nats::connect(&config.url).await.map_err(|e| {
            Error::network(format!(
                "Failed to connect to NATS server at {}: {e}",
                config.url
            ))
        })?;

        let jetstream = jetstream::new(client);
        Self::ensure_stream_exists(&jetstream, &config).await?;

        info!(stream = %config.stream, subject = %config.subject, "NATS work queue ready");
        Ok(Self { jetstream, config })
    }

    async fn ensure_stream_exists(
        jetstream: &jetstream::Context,
        config: &NatsQueueConfig,
    ) -> Result<()> {
        jetstream
            .get_or_create_stream(jetstream::stream::Config {
                name: config.stream.clone(),
                subjects: vec![config.subject.clone()],
                retention: jetstream::stream::RetentionPolicy::WorkQueue,
                ..Default::default()
            })
            .await
            .map_err(|e| {
                Error::infrastructure(format!(
                    "Failed to create JetStream stream '{}': {e}",
                    config.stream
                ))
            })?;
        debug!("JetStream stream '{}' ready", config.stream);
        Ok(())
    }

    /// Get the configured subject
    pub fn subject(&self) -> &str {
        &self.config.subject
    }

    async fn process(handler: &dyn ChangeEventHandler, message: jetstream::Message) {
        let event = match serde_json::from_slice::<ChangeEvent>(&message.payload) {
            Ok(event) => event,
            Err(e) => {
                error!(error = %e, "undecodable change event, terminating");
                if let Err(e) = message.ack_with(AckKind::Term).await {
                    warn!(error = %e, "failed to terminate message");
                }
                return;
            }
        };

        let ack = match handler.handle(&event).await {
            Ok(()) => {
                debug!(entity_id = %event.entity_id, "event handled");
                message.ack().await
            }
            Err(e) => {
                warn!(entity_id = %event.entity_id, error = %e, "event handling failed, requesting redelivery");
                message.ack_with(AckKind::Nak(None)).await
            }
        };
        if let Err(e) = ack {
            warn!(entity_id = %event.entity_id, error = %e, "failed to acknowledge message");
        }
    }
}

#[async_trait]
impl EventPublisher for NatsEventQueue {
    async fn publish(&self, event: &ChangeEvent) -> Result<()> {
        let payload = serde_json::to_vec(event)?;

        let ack = self
            .jetstream
            .publish(self.config.subject.clone(), payload.into())
            .await
            .map_err(|e| Error::network(format!("Failed to publish event to NATS: {e}")))?
            .await
            .map_err(|e| Error::network(format!("NATS did not acknowledge event: {e}")))?;

        debug!(sequence = ack.sequence, entity_id = %event.entity_id, "event stored");
        Ok(())
    }
}

#[async_trait]
impl EventSubscriber for NatsEventQueue {
    async fn run(
        &self,
        handler: Arc<dyn ChangeEventHandler>,
        shutdown: CancellationToken,
    ) -> Result<()> {
        let stream = self
            .jetstream
            .get_stream(&self.config.stream)
            .await
            .map_err(|e| Error::infrastructure(format!("Failed to open JetStream stream: {e}")))?;

        let consumer = stream
            .get_or_create_consumer(
                &self.config.consumer,
                jetstream::consumer::pull::Config {
                    durable_name: Some(self.config.consumer.clone()),
                    ack_policy: jetstream::consumer::AckPolicy::Explicit,
                    ack_wait: NATS_CONSUMER_ACK_WAIT,
                    max_deliver: i64::from(self.config.max_redeliveries) + 1,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| Error::infrastructure(format!("Failed to create NATS consumer: {e}")))?;

        let messages = consumer
            .messages()
            .await
            .map_err(|e| Error::infrastructure(format!("Failed to pull NATS messages: {e}")))?;

        info!(consumer = %self.config.consumer, "event consumer started");
        messages
            .take_until(shutdown.cancelled())
            .for_each_concurrent(self.config.concurrency, |message| {
                let handler = Arc::clone(&handler);
                async move {
                    match message {
                        Ok(message) => Self::process(handler.as_ref(), message).await,
                        Err(e) => warn!(error = %e, "NATS message error"),
                    }
                }
            })
            .await;

        info!("event consumer stopped");
        Ok(())
    }
}

impl std::fmt::Debug for NatsEventQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsEventQueue")
            .field("config", &self.config)
            .finish()
    }
}
