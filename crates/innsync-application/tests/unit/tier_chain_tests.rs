//! Tests for read-through and write-through propagation

use crate::support::{InstrumentedTier, hotel, tiers};
use innsync_application::{BackfillPolicy, TierChain, UpdateFallback};
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::CacheTier;
use innsync_domain::Hotel;
use std::future::{Ready, ready};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

fn two_tiers() -> (
    Arc<InstrumentedTier<Hotel>>,
    Arc<InstrumentedTier<Hotel>>,
    TierChain<Hotel>,
) {
    let fast = InstrumentedTier::new("fast");
    let slow = InstrumentedTier::new("slow");
    let chain = TierChain::new(tiers(&[&fast, &slow]));
    (fast, slow, chain)
}

fn durable(record: Option<Hotel>) -> Ready<Result<Option<Hotel>>> {
    ready(Ok(record))
}

#[tokio::test]
async fn test_tier_names_follow_lookup_order() {
    let (_, _, chain) = two_tiers();
    assert_eq!(chain.tier_names(), vec!["fast", "slow"]);
}

#[tokio::test]
async fn test_hit_in_later_tier_backfills_earlier_tiers_only() {
    let (fast, slow, chain) = two_tiers();
    slow.create(&hotel("h1", "Inn")).await.unwrap();
    let durable_polled = AtomicBool::new(false);

    let found = chain
        .read_through("get", &Hotel::cache_key("h1"), BackfillPolicy::Fatal, async {
            durable_polled.store(true, Ordering::SeqCst);
            Ok::<_, Error>(None)
        })
        .await
        .unwrap();

    assert_eq!(found.unwrap().name, "Inn");
    assert!(!durable_polled.load(Ordering::SeqCst));
    assert_eq!(fast.misses(), 1);
    assert_eq!(fast.creates(), 1);
    assert_eq!(slow.hits(), 1);
    assert_eq!(slow.creates(), 1);
}

#[tokio::test]
async fn test_durable_hit_backfills_every_tier() {
    let (fast, slow, chain) = two_tiers();
    let key = Hotel::cache_key("h1");

    let found = chain
        .read_through("get", &key, BackfillPolicy::Fatal, durable(Some(hotel("h1", "Inn"))))
        .await
        .unwrap();
    assert!(found.is_some());
    assert_eq!((fast.creates(), slow.creates()), (1, 1));

    let second = chain
        .read_through("get", &key, BackfillPolicy::Fatal, durable(None))
        .await
        .unwrap();
    assert!(second.is_some());
    assert_eq!(fast.hits(), 1);
    assert_eq!(slow.hits(), 0);
}

#[tokio::test]
async fn test_durable_miss_backfills_nothing() {
    let (fast, slow, chain) = two_tiers();

    let found = chain
        .read_through("get", "hotel:none", BackfillPolicy::Fatal, durable(None))
        .await
        .unwrap();

    assert!(found.is_none());
    assert_eq!(fast.creates() + slow.creates(), 0);
}

#[tokio::test]
async fn test_read_error_is_treated_as_miss() {
    let (fast, slow, chain) = two_tiers();
    slow.create(&hotel("h1", "Inn")).await.unwrap();
    fast.fail_reads();

    let found = chain
        .read_through("get", &Hotel::cache_key("h1"), BackfillPolicy::Fatal, durable(None))
        .await
        .unwrap();

    assert!(found.is_some());
    assert_eq!(fast.creates(), 1);
}

#[tokio::test]
async fn test_durable_error_propagates_unchanged() {
    let (_, _, chain) = two_tiers();

    let err = chain
        .read_through("get", "hotel:h1", BackfillPolicy::Fatal, ready(Err(Error::database("connection refused"))))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Database { .. }));
}

#[tokio::test]
async fn test_fatal_backfill_failure_names_the_tier() {
    let (fast, _, chain) = two_tiers();
    fast.fail_creates();

    let err = chain
        .read_through("get", "hotel:h1", BackfillPolicy::Fatal, durable(Some(hotel("h1", "Inn"))))
        .await
        .unwrap_err();

    assert_eq!(err.tier(), Some("fast"));
    assert!(err.durable_committed());
}

#[tokio::test]
async fn test_best_effort_backfill_failure_is_ignored() {
    let (fast, slow, chain) = two_tiers();
    fast.fail_creates();

    let found = chain
        .read_through("login", "hotel:h1", BackfillPolicy::BestEffort, durable(Some(hotel("h1", "Inn"))))
        .await
        .unwrap();

    assert!(found.is_some());
    assert_eq!(slow.creates(), 1);
}

#[tokio::test]
async fn test_create_all_stops_at_first_failure() {
    let (fast, slow, chain) = two_tiers();
    fast.fail_creates();

    let err = chain
        .create_all("create", &hotel("h1", "Inn"))
        .await
        .unwrap_err();

    assert_eq!(err.tier(), Some("fast"));
    assert_eq!(slow.creates(), 0);
}

#[tokio::test]
async fn test_update_creates_missing_record_when_allowed() {
    let (fast, slow, chain) = two_tiers();
    slow.create(&hotel("h1", "Inn")).await.unwrap();

    chain
        .update_all(
            "update",
            &hotel("h1", "Grand Inn"),
            UpdateFallback::CreateWhenMissing,
        )
        .await
        .unwrap();

    let key = Hotel::cache_key("h1");
    assert_eq!(fast.get(&key).await.unwrap().unwrap().name, "Grand Inn");
    assert_eq!(slow.get(&key).await.unwrap().unwrap().name, "Grand Inn");
}

#[tokio::test]
async fn test_strict_update_fails_on_missing_record() {
    let (_, slow, chain) = two_tiers();
    slow.create(&hotel("h1", "Inn")).await.unwrap();

    let err = chain
        .update_all("update", &hotel("h1", "Grand Inn"), UpdateFallback::Strict)
        .await
        .unwrap_err();

    assert_eq!(err.tier(), Some("fast"));
    assert!(err.to_string().contains("fast"));
    let slow_copy = slow.get(&Hotel::cache_key("h1")).await.unwrap().unwrap();
    assert_eq!(slow_copy.name, "Inn");
}

#[tokio::test]
async fn test_delete_attempts_every_tier() {
    let (fast, slow, chain) = two_tiers();
    let record = hotel("h1", "Inn");
    chain.create_all("create", &record).await.unwrap();
    fast.fail_deletes();

    let failures = chain.delete_all("delete", &[Hotel::cache_key("h1")]).await;

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].tier(), Some("fast"));
    assert!(slow.get(&Hotel::cache_key("h1")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_of_absent_key_succeeds() {
    let (_, _, chain) = two_tiers();
    assert!(
        chain
            .delete_all("delete", &["hotel:none".to_string()])
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn test_delete_removes_every_listed_key() {
    let (fast, slow, chain) = two_tiers();
    chain.create_all("create", &hotel("h1", "Inn")).await.unwrap();
    chain.create_all("create", &hotel("h2", "Lodge")).await.unwrap();

    let keys = [Hotel::cache_key("h1"), Hotel::cache_key("h2")];
    assert!(chain.delete_all("delete", &keys).await.is_empty());

    for tier in [&fast, &slow] {
        for key in &keys {
            assert!(tier.get(key).await.unwrap().is_none());
        }
    }
}
