use mcs_error::{ErrorContext, format_context};
use std::borrow::Cow;

/// Errors raised while loading configuration sources.
///
/// Resolution itself never fails; these only surface when the shell reads its own settings or a
/// runtime document that exists but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The layered settings loader failed (missing required file, type mismatch, ...).
    #[error("Settings error{}: {source}", format_context(.context))]
    Settings { source: config::ConfigError, context: ErrorContext },

    /// The runtime document could not be read.
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: ErrorContext },

    /// The runtime document is not valid JSON.
    #[error("Malformed runtime document{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: ErrorContext },

    /// The runtime document is valid JSON but not an object of entries.
    #[error("Invalid runtime document{}: {message}", format_context(.context))]
    Document { message: Cow<'static, str>, context: ErrorContext },

    /// The build prefix cannot match any entry of the captured build-time table.
    #[error(
        "Invalid build prefix '{prefix}'{}: captured keys all start with '{required}'",
        format_context(.context)
    )]
    InvalidPrefix { prefix: String, required: &'static str, context: ErrorContext },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

mcs_error::context_ext!(
    /// Adds `.context(..)` to results that convert into [`ConfigError`].
    pub trait ConfigErrorExt for ConfigError { Settings, Io, Json, Document, InvalidPrefix }
);

impl<T> ConfigErrorExt<T> for std::result::Result<T, config::ConfigError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| ConfigError::Settings { source, context: Some(context.into()) })
    }
}

impl<T> ConfigErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| ConfigError::Io { source, context: Some(context.into()) })
    }
}

impl<T> ConfigErrorExt<T> for std::result::Result<T, serde_json::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| ConfigError::Json { source, context: Some(context.into()) })
    }
}

mcs_error::from_source!(ConfigError {
    config::ConfigError => Settings,
    std::io::Error => Io,
    serde_json::Error => Json,
});
