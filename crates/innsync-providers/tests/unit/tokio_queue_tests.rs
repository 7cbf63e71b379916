//! Tests for the in-process work queue

use async_trait::async_trait;
use innsync_application::ports::{ChangeEventHandler, EventSubscriber};
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::EventPublisher;
use innsync_domain::ChangeEvent;
use innsync_providers::events::TokioEventQueue;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Records events and fails the first `failures` deliveries
#[derive(Default)]
struct FlakyHandler {
    seen: Mutex<Vec<ChangeEvent>>,
    failures: Mutex<usize>,
}

impl FlakyHandler {
    fn failing(times: usize) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            failures: Mutex::new(times),
        }
    }

    fn seen(&self) -> Vec<ChangeEvent> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChangeEventHandler for FlakyHandler {
    async fn handle(&self, event: &ChangeEvent) -> Result<()> {
        self.seen.lock().unwrap().push(event.clone());
        let mut failures = self.failures.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(Error::network("hotels api unavailable"));
        }
        Ok(())
    }
}

fn queue() -> Arc<TokioEventQueue> {
    Arc::new(
        TokioEventQueue::with_capacity(16)
            .with_redelivery_delay(Duration::ZERO)
            .with_concurrency(2),
    )
}

async fn run_until<F: Fn() -> bool>(
    queue: &Arc<TokioEventQueue>,
    handler: Arc<FlakyHandler>,
    done: F,
) {
    let shutdown = CancellationToken::new();
    let consumer = {
        let queue = Arc::clone(queue);
        let shutdown = shutdown.clone();
        tokio::spawn(async move { queue.run(handler, shutdown).await })
    };

    for _ in 0..200 {
        if done() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    shutdown.cancel();
    consumer.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_published_events_are_handled() {
    let queue = queue();
    let handler = Arc::new(FlakyHandler::default());

    queue.publish(&ChangeEvent::created("a")).await.unwrap();
    queue.publish(&ChangeEvent::updated("b")).await.unwrap();
    assert_eq!(queue.pending(), 2);

    let watched = Arc::clone(&handler);
    run_until(&queue, Arc::clone(&handler), move || watched.seen().len() == 2).await;

    let mut ids: Vec<_> = handler.seen().into_iter().map(|e| e.entity_id).collect();
    ids.sort();
    assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn test_failed_event_is_redelivered() {
    let queue = queue();
    let handler = Arc::new(FlakyHandler::failing(2));

    queue.publish(&ChangeEvent::updated("h1")).await.unwrap();

    let watched = Arc::clone(&handler);
    run_until(&queue, Arc::clone(&handler), move || watched.seen().len() == 3).await;

    assert_eq!(handler.seen().len(), 3);
    assert!(handler.seen().iter().all(|e| e.entity_id == "h1"));
}

#[tokio::test]
async fn test_event_dropped_after_max_redeliveries() {
    let queue = Arc::new(
        TokioEventQueue::with_capacity(16)
            .with_redelivery_delay(Duration::ZERO)
            .with_max_redeliveries(1),
    );
    let handler = Arc::new(FlakyHandler::failing(10));

    queue.publish(&ChangeEvent::deleted("h1")).await.unwrap();

    let watched = Arc::clone(&handler);
    run_until(&queue, Arc::clone(&handler), move || watched.seen().len() >= 2).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    // One delivery plus one redelivery.
    assert_eq!(handler.seen().len(), 2);
    assert_eq!(queue.pending(), 0);
}

#[tokio::test]
async fn test_run_returns_on_shutdown_without_events() {
    let queue = queue();
    let shutdown = CancellationToken::new();
    shutdown.cancel();

    let result = queue
        .run(Arc::new(FlakyHandler::default()), shutdown)
        .await;
    assert!(result.is_ok());
}
