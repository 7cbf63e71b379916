//! Application wiring
//!
//! Every adapter is constructed once here from [`AppConfig`] and handed to
//! the services as an `Arc`. Nothing is stored in globals; callers own the
//! returned [`AppContext`].

use crate::config::{
    AppConfig, EventBusConfig, EventBusProvider, HotelsApiConfig, PrimaryCacheConfig,
    PrimaryCacheProvider, SearchConfig, SearchProvider, SecondaryCacheConfig,
    SecondaryCacheProvider,
};
use crate::crypto::{Argon2PasswordHasher, JwtTokenizer};
use crate::logging::log_cache_tier;
use innsync_application::ports::EventSubscriber;
use innsync_application::{HotelService, ProviderTier, Reindexer, UserService};
use innsync_domain::constants::{PRIMARY_CACHE_TIER, SECONDARY_CACHE_TIER};
use innsync_domain::error::Result;
use innsync_domain::ports::{CacheProvider, EventPublisher, HotelSource, SearchIndex};
use innsync_providers::cache::{MemoryCacheProvider, MokaCacheProvider};
use innsync_providers::durable::{InMemoryHotelRepository, InMemoryUserRepository};
use innsync_providers::events::TokioEventQueue;
use innsync_providers::http::HttpHotelSource;
use innsync_providers::search::{InMemorySearchIndex, SolrSearchIndex};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Both ends of the change-event channel
#[derive(Clone)]
pub struct EventChannel {
    /// Used by the hotel service
    pub publisher: Arc<dyn EventPublisher>,
    /// Drives the reindexer
    pub subscriber: Arc<dyn EventSubscriber>,
}

/// Services and channels built from one configuration
pub struct AppContext {
    /// Effective configuration
    pub config: AppConfig,
    /// Hotel access over {primary cache, durable store}
    pub hotels: Arc<HotelService>,
    /// Account access over {primary cache, secondary cache, durable store}
    pub users: Arc<UserService>,
    /// Search index reconciler
    pub reindexer: Arc<Reindexer>,
    /// Change-event channel shared by `hotels` and `reindexer`
    pub events: EventChannel,
}

impl AppContext {
    /// Build every component described by `config`
    ///
    /// Remote providers (Redis, NATS) are connected here, so a misconfigured
    /// endpoint fails at startup.
    pub async fn build(config: AppConfig) -> Result<Self> {
        let events = build_event_channel(&config.event_bus).await?;

        let hotels = Arc::new(HotelService::new(
            vec![
                ProviderTier::new(
                    PRIMARY_CACHE_TIER,
                    build_primary_cache(&config.cache.primary),
                )
                .shared(),
            ],
            Arc::new(InMemoryHotelRepository::new()),
            Arc::clone(&events.publisher),
        ));

        if config.auth.uses_default_secret() {
            warn!("auth.jwt_secret is the development key; set INNSYNC_AUTH__JWT_SECRET");
        }
        let users = Arc::new(UserService::new(
            vec![
                ProviderTier::new(
                    PRIMARY_CACHE_TIER,
                    build_primary_cache(&config.cache.primary),
                )
                .shared(),
                ProviderTier::new(
                    SECONDARY_CACHE_TIER,
                    build_secondary_cache(&config.cache.secondary)?,
                )
                .shared(),
            ],
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(JwtTokenizer::from_config(&config.auth)),
        ));

        let reindexer = Arc::new(Reindexer::new(
            build_hotel_source(&config.hotels_api)?,
            build_search_index(&config.search)?,
        ));

        info!(
            event_bus = ?config.event_bus.provider,
            search = ?config.search.provider,
            "application context ready"
        );
        Ok(Self {
            config,
            hotels,
            users,
            reindexer,
            events,
        })
    }

    /// Feed change events to the reindexer until `shutdown` is cancelled
    pub async fn run_reindexer(&self, shutdown: CancellationToken) -> Result<()> {
        self.events
            .subscriber
            .run(self.reindexer.clone(), shutdown)
            .await
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("hotels", &self.hotels)
            .field("users", &self.users)
            .field("reindexer", &self.reindexer)
            .finish_non_exhaustive()
    }
}

/// In-process cache for the fastest tier
pub fn build_primary_cache(config: &PrimaryCacheConfig) -> Arc<dyn CacheProvider> {
    let provider: Arc<dyn CacheProvider> = match config.provider {
        PrimaryCacheProvider::Memory => Arc::new(MemoryCacheProvider::with_config(
            config.max_size,
            config.items_to_prune,
            config.ttl(),
        )),
        PrimaryCacheProvider::Moka => Arc::new(MokaCacheProvider::with_config(
            config.max_size,
            config.ttl(),
        )),
    };
    log_cache_tier(PRIMARY_CACHE_TIER, provider.provider_name(), config.ttl());
    provider
}

/// Shared cache for the second tier
pub fn build_secondary_cache(config: &SecondaryCacheConfig) -> Result<Arc<dyn CacheProvider>> {
    let provider: Arc<dyn CacheProvider> = match config.provider {
        SecondaryCacheProvider::Memory => Arc::new(MemoryCacheProvider::with_config(
            innsync_providers::constants::CACHE_DEFAULT_MAX_SIZE,
            innsync_providers::constants::CACHE_DEFAULT_ITEMS_TO_PRUNE,
            config.ttl(),
        )),
        #[cfg(feature = "cache-redis")]
        SecondaryCacheProvider::Redis => Arc::new(
            innsync_providers::cache::RedisCacheProvider::new(&config.redis_url)?
                .with_namespace(config.namespace.clone())
                .with_ttl(config.ttl()),
        ),
        #[cfg(not(feature = "cache-redis"))]
        SecondaryCacheProvider::Redis => {
            return Err(innsync_domain::Error::configuration(
                "secondary cache provider 'redis' requires the cache-redis feature",
            ));
        }
    };
    log_cache_tier(SECONDARY_CACHE_TIER, provider.provider_name(), config.ttl());
    Ok(provider)
}

/// Work queue carrying hotel change events
pub async fn build_event_channel(config: &EventBusConfig) -> Result<EventChannel> {
    match config.provider {
        EventBusProvider::Tokio => {
            let queue = Arc::new(
                TokioEventQueue::with_capacity(config.capacity)
                    .with_max_redeliveries(config.max_redeliveries)
                    .with_concurrency(config.concurrency),
            );
            Ok(EventChannel {
                publisher: queue.clone(),
                subscriber: queue,
            })
        }
        #[cfg(feature = "events-nats")]
        EventBusProvider::Nats => {
            use innsync_providers::events::{NatsEventQueue, NatsQueueConfig};

            let queue = Arc::new(
                NatsEventQueue::connect(NatsQueueConfig {
                    url: config.nats_url.clone(),
                    subject: config.subject.clone(),
                    stream: config.stream.clone(),
                    consumer: config.consumer.clone(),
                    max_redeliveries: config.max_redeliveries,
                    concurrency: config.concurrency,
                })
                .await?,
            );
            Ok(EventChannel {
                publisher: queue.clone(),
                subscriber: queue,
            })
        }
        #[cfg(not(feature = "events-nats"))]
        EventBusProvider::Nats => Err(innsync_domain::Error::configuration(
            "event bus provider 'nats' requires the events-nats feature",
        )),
    }
}

/// Index the reindexer writes to
pub fn build_search_index(config: &SearchConfig) -> Result<Arc<dyn SearchIndex>> {
    Ok(match config.provider {
        SearchProvider::Memory => Arc::new(InMemorySearchIndex::new()),
        SearchProvider::Solr => Arc::new(SolrSearchIndex::new(
            &config.solr_url,
            &config.collection,
        )?),
    })
}

/// Client for the hotels API
pub fn build_hotel_source(config: &HotelsApiConfig) -> Result<Arc<dyn HotelSource>> {
    Ok(Arc::new(HttpHotelSource::with_timeout(
        &config.base_url,
        config.timeout(),
    )?))
}
