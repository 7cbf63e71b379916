//! Domain layer constants

// ============================================================================
// Cache Keys
// ============================================================================

/// Namespace for hotel entries in cache tiers
pub const HOTEL_CACHE_NAMESPACE: &str = "hotel";

/// Namespace for user entries in cache tiers
pub const USER_CACHE_NAMESPACE: &str = "user";

/// Key segment for users addressed by numeric id
pub const USER_KEY_BY_ID: &str = "id";

/// Key segment for users addressed by username
pub const USER_KEY_BY_USERNAME: &str = "username";

// ============================================================================
// Accounts
// ============================================================================

/// Role assigned to accounts created without an explicit role
pub const DEFAULT_USER_ROLE: &str = "customer";

/// Message returned for every failed login, whatever the cause
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

// ============================================================================
// Tier Names
// ============================================================================

/// Name of the fastest cache tier
pub const PRIMARY_CACHE_TIER: &str = "primary";

/// Name of the shared remote cache tier
pub const SECONDARY_CACHE_TIER: &str = "secondary";

/// Name reported for the change-event publisher in tier failures
pub const EVENT_TIER: &str = "events";

/// Default name of the work queue carrying hotel change events
pub const DEFAULT_EVENT_QUEUE: &str = "hotels-news";
