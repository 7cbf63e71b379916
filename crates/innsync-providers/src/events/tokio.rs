//! In-process work queue
//!
//! Bounded tokio mpsc channel shared by any number of consumer loops. The
//! receiver sits behind an async mutex, so each event is taken by exactly
//! one loop. A failed event is re-enqueued until its redeliveries are used
//! up, then logged and dropped.
//!
//! ## Example
//!
//! ```ignore
//! use innsync_providers::events::TokioEventQueue;
//!
//! let queue = Arc::new(TokioEventQueue::new());
//! queue.publish(&ChangeEvent::created("65f1")).await?;
//! queue.run(reindexer, shutdown.clone()).await?;
//! ```

use crate::constants::{
    EVENT_QUEUE_DEFAULT_CAPACITY, EVENT_QUEUE_DEFAULT_CONCURRENCY,
    EVENT_QUEUE_DEFAULT_MAX_REDELIVERIES, EVENT_QUEUE_DEFAULT_REDELIVERY_DELAY,
};
use async_trait::async_trait;
use innsync_application::ports::{ChangeEventHandler, EventSubscriber};
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::EventPublisher;
use innsync_domain::ChangeEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

#[derive(Debug)]
struct Delivery {
    event: ChangeEvent,
    redeliveries: u32,
}

/// In-process change-event work queue
pub struct TokioEventQueue {
    sender: mpsc::Sender<Delivery>,
    receiver: Arc<Mutex<mpsc::Receiver<Delivery>>>,
    capacity: usize,
    max_redeliveries: u32,
    concurrency: usize,
    redelivery_delay: Duration,
}

impl Default for TokioEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TokioEventQueue {
    /// Create a queue with default capacity (1024)
    pub fn new() -> Self {
        Self::with_capacity(EVENT_QUEUE_DEFAULT_CAPACITY)
    }

    /// Create with custom capacity
    ///
    /// Publishing waits while the queue is full.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
            capacity: capacity.max(1),
            max_redeliveries: EVENT_QUEUE_DEFAULT_MAX_REDELIVERIES,
            concurrency: EVENT_QUEUE_DEFAULT_CONCURRENCY,
            redelivery_delay: EVENT_QUEUE_DEFAULT_REDELIVERY_DELAY,
        }
    }

    /// Redeliveries allowed after the first failed handling
    pub fn with_max_redeliveries(mut self, max_redeliveries: u32) -> Self {
        self.max_redeliveries = max_redeliveries;
        self
    }

    /// Events handled concurrently by one consumer loop
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Pause before a failed event is put back on the queue
    pub fn with_redelivery_delay(mut self, delay: Duration) -> Self {
        self.redelivery_delay = delay;
        self
    }

    /// Events waiting to be taken by a consumer
    pub fn pending(&self) -> usize {
        self.capacity - self.sender.capacity()
    }

    async fn next_delivery(&self, shutdown: &CancellationToken) -> Option<Delivery> {
        let mut receiver = tokio::select! {
            () = shutdown.cancelled() => return None,
            receiver = self.receiver.lock() => receiver,
        };
        tokio::select! {
            () = shutdown.cancelled() => None,
            delivery = receiver.recv() => delivery,
        }
    }
}

#[async_trait]
impl EventPublisher for TokioEventQueue {
    async fn publish(&self, event: &ChangeEvent) -> Result<()> {
        self.sender
            .send(Delivery {
                event: event.clone(),
                redeliveries: 0,
            })
            .await
            .map_err(|_| Error::infrastructure("event queue is closed"))?;
        debug!(operation = %event.operation, entity_id = %event.entity_id, "event enqueued");
        Ok(())
    }
}

#[async_trait]
impl EventSubscriber for TokioEventQueue {
    async fn run(
        &self,
        handler: Arc<dyn ChangeEventHandler>,
        shutdown: CancellationToken,
    ) -> Result<()> {
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        info!(concurrency = self.concurrency, "event consumer started");

        while let Some(delivery) = self.next_delivery(&shutdown).await {
            let permit = Arc::clone(&permits)
                .acquire_owned()
                .await
                .map_err(|e| Error::infrastructure_with_source("consumer semaphore closed", e))?;
            let handler = Arc::clone(&handler);
            let sender = self.sender.clone();
            let max_redeliveries = self.max_redeliveries;
            let delay = self.redelivery_delay;

            tasks.spawn(async move {
                let outcome = handler.handle(&delivery.event).await;
                // Free the slot before re-enqueueing so a full queue can drain.
                drop(permit);
                match outcome {
                    Ok(()) => debug!(entity_id = %delivery.event.entity_id, "event handled"),
                    Err(e) if delivery.redeliveries < max_redeliveries => {
                        warn!(
                            entity_id = %delivery.event.entity_id,
                            attempt = delivery.redeliveries + 1,
                            error = %e,
                            "event handling failed, redelivering"
                        );
                        tokio::time::sleep(delay).await;
                        let retry = Delivery {
                            event: delivery.event,
                            redeliveries: delivery.redeliveries + 1,
                        };
                        if sender.send(retry).await.is_err() {
                            error!("event queue closed during redelivery");
                        }
                    }
                    Err(e) => error!(
                        entity_id = %delivery.event.entity_id,
                        error = %e,
                        "event dropped after exhausting redeliveries"
                    ),
                }
            });

            while let Some(joined) = tasks.try_join_next() {
                if let Err(e) = joined {
                    error!(error = %e, "event handler task failed");
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "event handler task failed");
            }
        }
        info!("event consumer stopped");
        Ok(())
    }
}

impl std::fmt::Debug for TokioEventQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioEventQueue")
            .field("capacity", &self.capacity)
            .field("max_redeliveries", &self.max_redeliveries)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}
