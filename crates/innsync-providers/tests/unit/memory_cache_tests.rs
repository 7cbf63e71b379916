//! Tests for the bounded in-memory cache

use innsync_domain::ports::{CacheEntryConfig, CacheProvider};
use innsync_providers::cache::MemoryCacheProvider;
use std::time::Duration;

const MINUTE: Duration = Duration::from_secs(60);

async fn put(cache: &MemoryCacheProvider, key: &str, value: &str) {
    cache
        .set_json(key, value, CacheEntryConfig::default())
        .await
        .expect("put");
}

#[tokio::test]
async fn test_get_returns_stored_value() {
    let cache = MemoryCacheProvider::with_config(10, 1, MINUTE);
    put(&cache, "hotel:1", r#"{"id":"1"}"#).await;

    assert_eq!(
        cache.get_json("hotel:1").await.unwrap().as_deref(),
        Some(r#"{"id":"1"}"#)
    );
    assert_eq!(cache.get_json("hotel:2").await.unwrap(), None);

    let stats = cache.stats().await.unwrap();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.entries, 1);
}

#[tokio::test(start_paused = true)]
async fn test_expired_entry_is_a_miss() {
    let cache = MemoryCacheProvider::with_config(10, 1, Duration::from_secs(30));
    put(&cache, "k", "v").await;

    tokio::time::advance(Duration::from_secs(29)).await;
    assert!(cache.exists("k").await.unwrap());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(cache.get_json("k").await.unwrap(), None);
    assert_eq!(cache.size().await.unwrap(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_per_entry_ttl_overrides_default() {
    let cache = MemoryCacheProvider::with_config(10, 1, MINUTE);
    cache
        .set_json(
            "short",
            "v",
            CacheEntryConfig::new().with_ttl(Duration::from_secs(1)),
        )
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(!cache.exists("short").await.unwrap());
}

#[tokio::test]
async fn test_overflow_prunes_oldest_batch() {
    let cache = MemoryCacheProvider::with_config(4, 2, MINUTE);
    for key in ["a", "b", "c", "d", "e"] {
        put(&cache, key, key).await;
    }

    // Fifth insert exceeded 4 entries, so the two oldest went in one batch.
    assert_eq!(cache.size().await.unwrap(), 3);
    assert!(!cache.exists("a").await.unwrap());
    assert!(!cache.exists("b").await.unwrap());
    for key in ["c", "d", "e"] {
        assert!(cache.exists(key).await.unwrap(), "{key} should remain");
    }
    assert_eq!(cache.stats().await.unwrap().evictions, 2);
}

#[tokio::test]
async fn test_reinserted_key_moves_to_back_of_order() {
    let cache = MemoryCacheProvider::with_config(2, 1, MINUTE);
    put(&cache, "a", "1").await;
    put(&cache, "b", "1").await;
    put(&cache, "a", "2").await;
    put(&cache, "c", "1").await;

    assert!(!cache.exists("b").await.unwrap());
    assert_eq!(cache.get_json("a").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn test_update_requires_resident_key() {
    let cache = MemoryCacheProvider::with_config(10, 1, MINUTE);

    let err = cache.replace_json("missing", "v").await.unwrap_err();
    assert!(err.is_not_found());

    put(&cache, "k", "old").await;
    cache.replace_json("k", "new").await.unwrap();
    assert_eq!(cache.get_json("k").await.unwrap().as_deref(), Some("new"));
}

#[tokio::test]
async fn test_update_keeps_insertion_position() {
    let cache = MemoryCacheProvider::with_config(2, 1, MINUTE);
    put(&cache, "a", "1").await;
    put(&cache, "b", "1").await;
    cache.replace_json("a", "2").await.unwrap();
    put(&cache, "c", "1").await;

    // "a" is still the oldest insertion despite the more recent update.
    assert!(!cache.exists("a").await.unwrap());
    assert!(cache.exists("b").await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_update_does_not_extend_expiry() {
    let cache = MemoryCacheProvider::with_config(10, 1, Duration::from_secs(30));
    put(&cache, "k", "1").await;

    tokio::time::advance(Duration::from_secs(20)).await;
    cache.replace_json("k", "2").await.unwrap();
    tokio::time::advance(Duration::from_secs(15)).await;

    assert_eq!(cache.get_json("k").await.unwrap(), None);
    assert!(cache.replace_json("k", "3").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let cache = MemoryCacheProvider::with_config(10, 1, MINUTE);
    put(&cache, "k", "v").await;

    assert!(cache.delete("k").await.unwrap());
    assert!(!cache.delete("k").await.unwrap());
}

#[tokio::test]
async fn test_concurrent_writers_respect_bound() {
    let cache = std::sync::Arc::new(MemoryCacheProvider::with_config(50, 10, MINUTE));
    let mut tasks = Vec::new();
    for worker in 0..8 {
        let cache = std::sync::Arc::clone(&cache);
        tasks.push(tokio::spawn(async move {
            for i in 0..100 {
                cache
                    .set_json(&format!("{worker}:{i}"), "v", CacheEntryConfig::default())
                    .await
                    .unwrap();
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert!(cache.size().await.unwrap() <= 50);
}

#[tokio::test]
async fn test_clear() {
    let cache = MemoryCacheProvider::new();
    put(&cache, "k", "v").await;
    cache.clear().await.unwrap();
    assert_eq!(cache.size().await.unwrap(), 0);
    assert_eq!(cache.provider_name(), "memory");
}
