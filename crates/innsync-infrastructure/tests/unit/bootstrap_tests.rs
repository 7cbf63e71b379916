//! Wiring tests over the default in-process providers

use innsync_domain::ports::{CacheProvider, EventPublisher, PasswordHasher};
use innsync_domain::{HotelDraft, HotelPatch, NewUser, Operation};
use innsync_infrastructure::bootstrap::{
    build_event_channel, build_primary_cache, build_search_index, build_secondary_cache,
};
use innsync_infrastructure::config::{
    AppConfig, EventBusConfig, PrimaryCacheConfig, PrimaryCacheProvider, SearchConfig,
    SearchProvider, SecondaryCacheConfig, SecondaryCacheProvider,
};
use innsync_infrastructure::crypto::{Argon2PasswordHasher, JwtTokenizer};
use innsync_infrastructure::AppContext;

#[tokio::test]
async fn test_default_context_serves_hotels() {
    let ctx = AppContext::build(AppConfig::default()).await.unwrap();
    assert_eq!(ctx.hotels.chain().tier_names(), vec!["primary"]);

    let created = ctx
        .hotels
        .create(HotelDraft {
            name: "Inn".to_string(),
            city: "X".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let updated = ctx
        .hotels
        .update(&created.id, HotelPatch::default().with_rating(4.5))
        .await
        .unwrap();

    assert_eq!(ctx.hotels.get_by_id(&created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_default_context_logs_users_in() {
    let ctx = AppContext::build(AppConfig::default()).await.unwrap();
    assert_eq!(
        ctx.users.chain().tier_names(),
        vec!["primary", "secondary"]
    );

    let user = ctx
        .users
        .create(NewUser {
            username: "ana".to_string(),
            password: "secret".to_string(),
            role: String::new(),
        })
        .await
        .unwrap();
    assert!(Argon2PasswordHasher::new().verify("secret", &user.password).unwrap());

    let login = ctx.users.login("ana", "secret").await.unwrap();
    let claims = JwtTokenizer::from_config(&ctx.config.auth)
        .validate(&login.token)
        .unwrap();

    assert_eq!(login.role, "customer");
    assert_eq!(claims.role, login.role);
    assert_eq!(claims.sub, user.id.to_string());
}

#[tokio::test]
async fn test_tokio_channel_accepts_events() {
    let channel = build_event_channel(&EventBusConfig::default()).await.unwrap();

    channel
        .publisher
        .publish(&innsync_domain::ChangeEvent::new(Operation::Update, "h1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_primary_cache_providers() {
    for (provider, name) in [
        (PrimaryCacheProvider::Memory, "memory"),
        (PrimaryCacheProvider::Moka, "moka"),
    ] {
        let cache = build_primary_cache(&PrimaryCacheConfig {
            provider,
            ..Default::default()
        });
        assert_eq!(cache.provider_name(), name);
    }
}

#[test]
fn test_secondary_memory_cache() {
    let cache = build_secondary_cache(&SecondaryCacheConfig::default()).unwrap();
    assert_eq!(cache.provider_name(), "memory");
}

#[cfg(not(feature = "cache-redis"))]
#[test]
fn test_redis_requires_feature() {
    let result = build_secondary_cache(&SecondaryCacheConfig {
        provider: SecondaryCacheProvider::Redis,
        ..Default::default()
    });
    assert!(result.is_err());
}

#[cfg(not(feature = "events-nats"))]
#[tokio::test]
async fn test_nats_requires_feature() {
    let result = build_event_channel(&EventBusConfig::nats("nats://localhost:4222")).await;
    assert!(result.is_err());
}

#[test]
fn test_solr_index_is_built_without_connecting() {
    assert!(
        build_search_index(&SearchConfig {
            provider: SearchProvider::Solr,
            ..Default::default()
        })
        .is_ok()
    );
}
