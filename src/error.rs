//! Error types for definition resolution.

use std::path::PathBuf;
use thiserror::Error;

/// A single provider's invocation failed.
///
/// These never reach the caller of a resolve; they are reported to the
/// error sink and the provider contributes no results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider returned an error
    #[error("Provider '{provider}' failed: {message}")]
    Failed { provider: String, message: String },

    /// The provider panicked while computing its result
    #[error("Provider '{provider}' panicked: {message}")]
    Panicked { provider: String, message: String },
}

impl ProviderError {
    /// Convenience constructor for provider implementations.
    pub fn failed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderError::Failed {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Name of the provider that failed.
    pub fn provider(&self) -> &str {
        match self {
            ProviderError::Failed { provider, .. } | ProviderError::Panicked { provider, .. } => {
                provider
            }
        }
    }
}

/// Errors from the named command surface.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
}

/// Errors loading a provider manifest.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Manifest could not be read
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid TOML for this schema
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An answer specifies both `link` and `links`
    #[error("Provider '{provider}' has an answer with both 'link' and 'links'")]
    AmbiguousAnswer { provider: String },

    /// `general.format` names no known output format
    #[error("Unknown output format '{0}'. Expected 'text' or 'json'")]
    UnknownFormat(String),

    /// Two providers share a name
    #[error("Duplicate provider name '{0}'")]
    DuplicateProvider(String),
}

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;
