//! Tests for search index reconciliation

use crate::support::{MapHotelSource, hotel};
use innsync_application::ports::ChangeEventHandler;
use innsync_application::{ReconcileOutcome, Reindexer};
use innsync_domain::ports::SearchIndex;
use innsync_domain::{ChangeEvent, Operation};
use innsync_providers::search::InMemorySearchIndex;
use std::sync::Arc;

fn reindexer() -> (Arc<MapHotelSource>, Arc<InMemorySearchIndex>, Arc<Reindexer>) {
    let source = MapHotelSource::new();
    let index = Arc::new(InMemorySearchIndex::new());
    let reindexer = Arc::new(Reindexer::new(source.clone(), index.clone()));
    (source, index, reindexer)
}

#[tokio::test]
async fn test_existing_hotel_is_indexed() {
    let (source, index, reindexer) = reindexer();
    source.put(hotel("h1", "Inn"));

    let outcome = reindexer.reconcile("h1").await.unwrap();

    assert_eq!(outcome, ReconcileOutcome::Indexed);
    assert_eq!(index.get("h1").unwrap().name, "Inn");
}

#[tokio::test]
async fn test_gone_hotel_is_removed() {
    let (_, index, reindexer) = reindexer();
    index.upsert(&hotel("h1", "Inn")).await.unwrap();

    let outcome = reindexer.reconcile("h1").await.unwrap();

    assert_eq!(outcome, ReconcileOutcome::Removed);
    assert!(!index.contains("h1"));
}

#[tokio::test]
async fn test_event_contents_are_never_applied() {
    let (source, index, reindexer) = reindexer();
    source.put(hotel("h1", "Inn"));

    // A stale DELETE for a hotel that still exists leaves it indexed.
    reindexer.handle(&ChangeEvent::deleted("h1")).await.unwrap();

    assert!(index.contains("h1"));
}

#[tokio::test]
async fn test_duplicate_or_reordered_events_converge_when_gone() {
    let orders = [
        [Operation::Create, Operation::Delete],
        [Operation::Delete, Operation::Create],
    ];

    for order in orders {
        let (_, index, reindexer) = reindexer();
        index.upsert(&hotel("h1", "Inn")).await.unwrap();

        for operation in order {
            reindexer
                .handle(&ChangeEvent::new(operation, "h1"))
                .await
                .unwrap();
        }

        assert!(!index.contains("h1"), "order {order:?}");
    }
}

#[tokio::test]
async fn test_reordered_events_converge_to_latest_state() {
    let (source, index, reindexer) = reindexer();
    let mut latest = hotel("h1", "Inn");
    latest.rating = 4.5;
    source.put(latest);

    reindexer.handle(&ChangeEvent::updated("h1")).await.unwrap();
    reindexer.handle(&ChangeEvent::created("h1")).await.unwrap();

    assert_eq!(index.len(), 1);
    assert!((index.get("h1").unwrap().rating - 4.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_fetch_failure_leaves_index_untouched() {
    let (source, index, reindexer) = reindexer();
    index.upsert(&hotel("h1", "Inn")).await.unwrap();
    source.fail(true);

    let result = reindexer.handle(&ChangeEvent::deleted("h1")).await;

    assert!(result.is_err());
    assert!(index.contains("h1"));
    assert_eq!(reindexer.in_flight(), 0);
}

#[tokio::test]
async fn test_event_without_id_is_skipped() {
    let (source, _, reindexer) = reindexer();

    reindexer.handle(&ChangeEvent::updated("")).await.unwrap();

    assert_eq!(source.fetches(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reconciles_release_their_locks() {
    let (source, index, reindexer) = reindexer();
    source.put(hotel("h1", "Inn"));
    source.put(hotel("h2", "Lodge"));

    let tasks: Vec<_> = (0..32)
        .map(|n| {
            let reindexer = Arc::clone(&reindexer);
            let id = if n % 2 == 0 { "h1" } else { "h2" };
            tokio::spawn(async move { reindexer.reconcile(id).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(index.len(), 2);
    assert_eq!(source.fetches(), 32);
    assert_eq!(reindexer.in_flight(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_reconciles_of_one_id_leave_no_lock_behind() {
    let (source, index, reindexer) = reindexer();
    source.put(hotel("h1", "Inn"));

    for _ in 0..20 {
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let reindexer = Arc::clone(&reindexer);
                tokio::spawn(async move { reindexer.reconcile("h1").await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(reindexer.in_flight(), 0);
    }

    assert!(index.contains("h1"));
}
