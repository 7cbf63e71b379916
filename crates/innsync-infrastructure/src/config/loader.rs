//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use crate::config::types::{
    AppConfig, AuthConfig, CacheConfig, EventBusConfig, EventBusProvider, LoggingConfig,
    SearchConfig, SearchProvider, SecondaryCacheProvider,
};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use innsync_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, else the first default location found)
    /// 3. Environment variables with prefix, nested keys split on `__`
    ///    (e.g. `INNSYNC_EVENT_BUS__PROVIDER=nats`)
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if !config_path.exists() {
                log_config_loaded(config_path, false);
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            figment = figment.merge(Toml::file(config_path));
            log_config_loaded(config_path, true);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string = to_toml(config)?;
        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;
        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing file among the default locations
    ///
    /// `./innsync.toml`, `./innsync/innsync.toml`, the user config dir, then
    /// `~/.innsync/innsync.toml`.
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a configuration as pretty TOML
pub fn to_toml(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_logging_config(&config.logging)?;
    validate_cache_config(&config.cache)?;
    validate_event_bus_config(&config.event_bus)?;
    validate_search_config(&config.search)?;
    validate_auth_config(&config.auth)?;
    if config.hotels_api.base_url.trim().is_empty() {
        return Err(Error::configuration("Hotels API base URL cannot be empty"));
    }
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

fn validate_cache_config(config: &CacheConfig) -> Result<()> {
    if config.primary.max_size == 0 {
        return Err(Error::configuration("Primary cache max_size cannot be 0"));
    }
    if config.primary.items_to_prune == 0 {
        return Err(Error::configuration(
            "Primary cache items_to_prune cannot be 0",
        ));
    }
    if config.primary.ttl_secs == 0 || config.secondary.ttl_secs == 0 {
        return Err(Error::configuration("Cache TTL cannot be 0"));
    }
    if config.secondary.provider == SecondaryCacheProvider::Redis
        && config.secondary.redis_url.trim().is_empty()
    {
        return Err(Error::configuration(
            "Redis URL is required when the secondary cache is redis",
        ));
    }
    Ok(())
}

fn validate_event_bus_config(config: &EventBusConfig) -> Result<()> {
    if config.concurrency == 0 {
        return Err(Error::configuration("Event bus concurrency cannot be 0"));
    }
    match config.provider {
        EventBusProvider::Tokio if config.capacity == 0 => Err(Error::configuration(
            "Event bus capacity cannot be 0",
        )),
        EventBusProvider::Nats if config.nats_url.trim().is_empty() => Err(
            Error::configuration("NATS URL is required when the event bus is nats"),
        ),
        EventBusProvider::Nats if config.subject.is_empty() || config.stream.is_empty() => Err(
            Error::configuration("NATS subject and stream cannot be empty"),
        ),
        _ => Ok(()),
    }
}

fn validate_search_config(config: &SearchConfig) -> Result<()> {
    if config.provider == SearchProvider::Solr
        && (config.solr_url.trim().is_empty() || config.collection.trim().is_empty())
    {
        return Err(Error::configuration(
            "Solr URL and collection are required when search is solr",
        ));
    }
    Ok(())
}

fn validate_auth_config(config: &AuthConfig) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(Error::configuration("JWT secret cannot be empty"));
    }
    if config.token_ttl_secs == 0 {
        return Err(Error::configuration("Token TTL cannot be 0"));
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Set event bus configuration
    pub fn with_event_bus(mut self, event_bus: EventBusConfig) -> Self {
        self.config.event_bus = event_bus;
        self
    }

    /// Set search configuration
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.config.search = search;
        self
    }

    /// Set authentication configuration
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.config.auth = auth;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
