//! Infrastructure layer constants

// ============================================================================
// Configuration
// ============================================================================

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "INNSYNC";

/// Separator between nested keys in environment variable names
///
/// `INNSYNC_CACHE__PRIMARY__MAX_SIZE` sets `cache.primary.max_size`.
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "innsync.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "innsync";

// ============================================================================
// Logging
// ============================================================================

/// Environment variable overriding the configured log filter
pub const LOG_ENV_FILTER: &str = "INNSYNC_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default file name prefix for rolling log files
pub const DEFAULT_LOG_FILE_PREFIX: &str = "innsync";

// ============================================================================
// Cache
// ============================================================================

/// Default expiry of cache entries in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30;

/// Default key namespace of the secondary cache
pub const DEFAULT_SECONDARY_NAMESPACE: &str = "innsync";

/// Default secondary cache URL
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

// ============================================================================
// Remote services
// ============================================================================

/// Default NATS server URL
pub const DEFAULT_NATS_URL: &str = "nats://localhost:4222";

/// Default hotels API URL
pub const DEFAULT_HOTELS_API_URL: &str = "http://localhost:8081";

/// Default hotels API request timeout in milliseconds
pub const DEFAULT_HOTELS_API_TIMEOUT_MS: u64 = 10_000;

/// Default Solr URL
pub const DEFAULT_SOLR_URL: &str = "http://localhost:8983";

// ============================================================================
// Authentication
// ============================================================================

/// Development signing key; deployments override it
pub const DEFAULT_JWT_SECRET: &str = "ThisIsAnExampleJWTKey!";

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;
