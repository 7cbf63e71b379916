//! Context helpers for foreign errors
//!
//! Third-party errors (I/O, TOML, figment, JWT) are folded into the domain
//! [`Error`] with a message prefix and the original error kept as source.

use innsync_domain::error::{Error, Result};
use std::fmt::Display;

/// Attach a message to a foreign error while converting it
///
/// ```ignore
/// std::fs::write(&path, body).context("Failed to write config file")?;
/// ```
pub trait ErrorContext<T> {
    /// Wrap as [`Error::Infrastructure`]
    fn context<C: Display>(self, context: C) -> Result<T>;

    /// Wrap as [`Error::Configuration`]
    fn config_context<C: Display>(self, context: C) -> Result<T>;

    /// Wrap as [`Error::Authentication`]
    fn auth_context<C: Display>(self, context: C) -> Result<T>;
}

fn wrap<T, E, C>(
    result: std::result::Result<T, E>,
    context: C,
    into: impl FnOnce(String, E) -> Error,
) -> Result<T>
where
    E: Display,
    C: Display,
{
    result.map_err(|err| into(format!("{context}: {err}"), err))
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C: Display>(self, context: C) -> Result<T> {
        wrap(self, context, Error::infrastructure_with_source)
    }

    fn config_context<C: Display>(self, context: C) -> Result<T> {
        wrap(self, context, Error::configuration_with_source)
    }

    fn auth_context<C: Display>(self, context: C) -> Result<T> {
        wrap(self, context, |message, err| Error::Authentication {
            message,
            source: Some(Box::new(err)),
        })
    }
}
