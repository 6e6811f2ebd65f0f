//! Configuration file handling.
//!
//! This module handles loading the `.navlink.toml` provider manifest and
//! merging it with command-line arguments.

use crate::cli::OutputFormat;
use crate::error::ConfigError;
use crate::fixture::{FixtureAnswer, FixtureProvider};
use crate::models::{Category, DefinitionLink, Position, Range};
use crate::registry::{DocumentSelector, LanguageFeatures};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Default manifest file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".navlink.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Providers, registered in file order.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output format: "text" or "json".
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            verbose: false,
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}

/// One fixture provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Name used in logs and error reports.
    pub name: String,

    /// Language id to serve, or "*".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// URI scheme to serve, or "*".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    /// Canned answers, first match wins.
    #[serde(default)]
    pub answers: Vec<FixtureAnswer>,
}

impl ProviderConfig {
    /// Selector built from `language` and `scheme`.
    pub fn selector(&self) -> DocumentSelector {
        DocumentSelector {
            language: self.language.clone(),
            scheme: self.scheme.clone(),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>, ConfigError> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Reject manifests that can't be turned into providers unambiguously.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if OutputFormat::from_config(&self.general.format).is_none() {
            return Err(ConfigError::UnknownFormat(self.general.format.clone()));
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            if !seen.insert(provider.name.as_str()) {
                return Err(ConfigError::DuplicateProvider(provider.name.clone()));
            }
            if provider
                .answers
                .iter()
                .any(|a| a.link.is_some() && a.links.is_some())
            {
                return Err(ConfigError::AmbiguousAnswer {
                    provider: provider.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(format) = args.format {
            self.general.format = format.as_str().to_string();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Register every configured provider for all three capabilities.
    pub fn build_features(&self) -> LanguageFeatures {
        let features = LanguageFeatures::new();
        for provider in &self.providers {
            debug!(
                "Registering provider {} ({} answers)",
                provider.name,
                provider.answers.len()
            );
            features.register_all(
                provider.selector(),
                Arc::new(FixtureProvider::new(
                    provider.name.clone(),
                    provider.answers.clone(),
                )),
            );
        }
        features
    }

    /// A small sample manifest.
    pub fn sample() -> Self {
        let span = |line, start, end| Range::new(Position::new(line, start), Position::new(line, end));

        let mut definition = FixtureAnswer::new(Category::Definition);
        definition.links = Some(vec![
            DefinitionLink::new("file:///src/lib.rs", span(11, 0, 24)),
            DefinitionLink::new("file:///src/compat.rs", span(3, 4, 20)),
        ]);

        let mut type_definition = FixtureAnswer::new(Category::TypeDefinition);
        type_definition.link = Some(DefinitionLink::new("file:///src/types.rs", span(40, 0, 16)));

        let mut flaky = FixtureAnswer::new(Category::Definition);
        flaky.delay_ms = 50;
        flaky.error = Some("index not ready".to_string());

        Config {
            general: GeneralConfig::default(),
            providers: vec![
                ProviderConfig {
                    name: "rust-analyzer".to_string(),
                    language: Some("rust".to_string()),
                    scheme: Some("file".to_string()),
                    answers: vec![definition, type_definition],
                },
                ProviderConfig {
                    name: "ctags".to_string(),
                    language: Some("*".to_string()),
                    scheme: None,
                    answers: vec![flaky],
                },
            ],
        }
    }

    /// Generate a sample configuration file content.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Config::sample()).unwrap_or_else(|_| String::new())
    }
}
