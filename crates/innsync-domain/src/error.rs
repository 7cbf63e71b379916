//! Error handling types
//!
//! Durable-store errors reach callers unchanged. Any failure in a cache tier
//! or in the event publisher is wrapped in [`Error::TierFailure`] naming the
//! operation and the tier, so callers can tell "the operation did not
//! happen" apart from "the data is safe but a fast tier is degraded" with
//! [`Error::durable_committed`].

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for innsync
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before touching any tier
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the rejected input
        message: String,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Resource already exists (unique constraint)
    #[error("Already exists: {resource}")]
    AlreadyExists {
        /// The conflicting resource
        resource: String,
    },

    /// A non-durable tier failed after the durable step succeeded
    #[error("{operation} failed at {tier} tier: {source}")]
    TierFailure {
        /// Operation being performed (e.g. `create`)
        operation: String,
        /// Name of the failing tier
        tier: String,
        /// Underlying tier error
        #[source]
        source: Box<Error>,
    },

    /// Several best-effort steps failed after the durable step succeeded
    #[error("{operation} completed with failures: {}", join_messages(.failures))]
    AggregatedTierFailure {
        /// Operation being performed (e.g. `delete`)
        operation: String,
        /// Every collected failure, each a `TierFailure`
        failures: Vec<Error>,
    },

    /// Authentication-related error
    #[error("Authentication error: {message}")]
    Authentication {
        /// Description of the authentication error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-related error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database-related error
    #[error("Database error: {message}")]
    Database {
        /// Description of the database error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Cache operation error
    #[error("Cache error: {message}")]
    Cache {
        /// Description of the cache error
        message: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

fn join_messages(failures: &[Error]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// Basic error creation methods
impl Error {
    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an already exists error
    pub fn already_exists<S: Into<String>>(resource: S) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}

// Tier failure creation methods
impl Error {
    /// Wrap a non-durable failure with the operation and tier it happened in
    pub fn tier_failure<O: Into<String>, T: Into<String>>(
        operation: O,
        tier: T,
        source: Error,
    ) -> Self {
        Self::TierFailure {
            operation: operation.into(),
            tier: tier.into(),
            source: Box::new(source),
        }
    }

    /// Collapse collected best-effort failures
    ///
    /// Returns `Ok(())` when nothing failed.
    pub fn aggregate<O: Into<String>>(operation: O, failures: Vec<Error>) -> Result<()> {
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Self::AggregatedTierFailure {
                operation: operation.into(),
                failures,
            })
        }
    }
}

// Configuration and authentication error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
            source: None,
        }
    }
}

// Network, database and infrastructure error creation methods
impl Error {
    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a database error
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification
impl Error {
    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True when the error was raised after the durable step succeeded
    ///
    /// The durable store holds the new state; only caches or the event
    /// channel are behind.
    pub fn durable_committed(&self) -> bool {
        matches!(
            self,
            Self::TierFailure { .. } | Self::AggregatedTierFailure { .. }
        )
    }

    /// Name of the failing tier for a `TierFailure`
    pub fn tier(&self) -> Option<&str> {
        match self {
            Self::TierFailure { tier, .. } => Some(tier),
            _ => None,
        }
    }

    /// Collected failures of an `AggregatedTierFailure`
    pub fn failures(&self) -> &[Error] {
        match self {
            Self::AggregatedTierFailure { failures, .. } => failures,
            _ => &[],
        }
    }
}
