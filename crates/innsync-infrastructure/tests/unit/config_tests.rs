//! Configuration loading and validation tests

use figment::Jail;
use innsync_domain::Error;
use innsync_infrastructure::config::loader::{
    ConfigBuilder, ConfigLoader, to_toml, validate_app_config,
};
use innsync_infrastructure::config::{
    AppConfig, EventBusConfig, EventBusProvider, PrimaryCacheProvider, SearchConfig,
    SearchProvider,
};
use innsync_infrastructure::constants::{DEFAULT_LOG_LEVEL, DEFAULT_TOKEN_TTL_SECS};
use tempfile::TempDir;

/// Load with default discovery from inside a jail
fn load() -> figment::Result<AppConfig> {
    ConfigLoader::new().load().map_err(|e| e.to_string().into())
}

#[test]
fn test_defaults() {
    Jail::expect_with(|_jail| {
        let config = load()?;

        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.cache.primary.provider, PrimaryCacheProvider::Memory);
        assert_eq!(config.cache.primary.max_size, 100_000);
        assert_eq!(config.cache.primary.items_to_prune, 100);
        assert_eq!(config.cache.primary.ttl_secs, 30);
        assert_eq!(config.event_bus.provider, EventBusProvider::Tokio);
        assert_eq!(config.event_bus.subject, "hotels-news");
        assert_eq!(config.auth.token_ttl_secs, DEFAULT_TOKEN_TTL_SECS);
        assert!(config.auth.uses_default_secret());
        Ok(())
    });
}

#[test]
fn test_default_file_in_working_directory_is_used() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "innsync.toml",
            r#"
            [cache.primary]
            provider = "moka"
            ttl_secs = 5

            [search]
            provider = "solr"
            solr_url = "http://solr:8983"
            "#,
        )?;

        let config = load()?;

        assert_eq!(config.cache.primary.provider, PrimaryCacheProvider::Moka);
        assert_eq!(config.cache.primary.ttl_secs, 5);
        assert_eq!(config.cache.primary.max_size, 100_000);
        assert_eq!(config.search.provider, SearchProvider::Solr);
        assert_eq!(config.search.collection, "hotels");
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("innsync.toml", "[event_bus]\ncapacity = 8\n")?;
        jail.set_env("INNSYNC_EVENT_BUS__CAPACITY", "64");
        jail.set_env("INNSYNC_CACHE__PRIMARY__MAX_SIZE", "10");
        jail.set_env("INNSYNC_AUTH__JWT_SECRET", "from-the-environment");

        let config = load()?;

        assert_eq!(config.event_bus.capacity, 64);
        assert_eq!(config.cache.primary.max_size, 10);
        assert_eq!(config.auth.jwt_secret, "from-the-environment");
        assert!(!config.auth.uses_default_secret());
        Ok(())
    });
}

#[test]
fn test_invalid_values_are_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("INNSYNC_CACHE__PRIMARY__TTL_SECS", "0");
        assert!(load().is_err());
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("absent.toml"))
        .load()
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_save_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("innsync.toml");

    let original = ConfigBuilder::new()
        .with_event_bus(EventBusConfig::nats("nats://queue:4222"))
        .with_search(SearchConfig {
            provider: SearchProvider::Solr,
            ..Default::default()
        })
        .build();

    let loader = ConfigLoader::new().with_config_path(&config_path);
    loader.save_to_file(&original, &config_path).unwrap();
    let loaded = loader.load().unwrap();

    assert_eq!(loaded.event_bus, original.event_bus);
    assert_eq!(loaded.search.provider, SearchProvider::Solr);
    assert_eq!(loader.config_path(), Some(config_path.as_path()));
}

#[test]
fn test_to_toml_renders_nested_sections() {
    let rendered = to_toml(&AppConfig::default()).unwrap();

    assert!(rendered.contains("[cache.primary]"));
    assert!(rendered.contains("[event_bus]"));
    assert!(rendered.contains("provider = \"tokio\""));
}

#[test]
fn test_validation_rules() {
    let mut config = AppConfig::default();
    config.logging.level = "verbose".to_string();
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.search.provider = SearchProvider::Solr;
    config.search.solr_url = String::new();
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.auth.jwt_secret = String::new();
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.event_bus.concurrency = 0;
    assert!(validate_app_config(&config).is_err());

    assert!(validate_app_config(&AppConfig::default()).is_ok());
}
