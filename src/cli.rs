//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{Category, Document, Position};
use crate::navigation::COMMAND_IDS;
use clap::Parser;
use std::path::PathBuf;

/// navlink - merged go-to-definition across language providers
///
/// Loads fixture providers from a manifest, asks every provider that
/// serves the document, and prints the merged targets in provider order.
///
/// Examples:
///   navlink --document file:///src/main.rs --language rust --line 3 --column 7
///   navlink -d file:///src/main.rs -l rust --line 3 --column 7 --category implementation
///   navlink -d file:///src/main.rs -l rust --line 3 --column 7 --command _executeTypeDefinitionProvider
///   navlink --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// URI of the document to query
    #[arg(short, long, value_name = "URI", required_unless_present = "init_config")]
    pub document: Option<String>,

    /// Language id of the document
    #[arg(short, long, value_name = "ID", required_unless_present = "init_config")]
    pub language: Option<String>,

    /// Zero-based line of the query position
    #[arg(long, default_value = "0", value_name = "LINE")]
    pub line: u32,

    /// Zero-based column of the query position
    #[arg(long, default_value = "0", value_name = "COLUMN")]
    pub column: u32,

    /// Version of the document buffer
    #[arg(long, default_value = "0", value_name = "VERSION")]
    pub document_version: i32,

    /// Which kind of target to resolve
    #[arg(long, default_value = "definition", conflicts_with = "command")]
    pub category: CategoryArg,

    /// Run a named command instead of picking a category
    ///
    /// One of _executeDefinitionProvider, _executeImplementationProvider,
    /// _executeTypeDefinitionProvider.
    #[arg(long, value_name = "ID")]
    pub command: Option<String>,

    /// Path to the provider manifest
    ///
    /// If not specified, looks for .navlink.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "NAVLINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (text, json); overrides the manifest
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Exit with code 2 when no targets are found
    #[arg(long)]
    pub fail_on_empty: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a sample .navlink.toml manifest
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for resolved targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `uri:line:column` per line (default)
    #[default]
    Text,
    /// Pretty-printed JSON array
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }

    /// Parse a manifest format string, case-insensitively.
    pub fn from_config(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Category selection for --category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CategoryArg {
    Definition,
    Implementation,
    TypeDefinition,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Definition => Category::Definition,
            CategoryArg::Implementation => Category::Implementation,
            CategoryArg::TypeDefinition => Category::TypeDefinition,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        let document = self.document.as_deref().unwrap_or("");
        if document.trim().is_empty() {
            return Err("Document URI must not be empty".to_string());
        }

        let language = self.language.as_deref().unwrap_or("");
        if language.trim().is_empty() {
            return Err("Language id must not be empty".to_string());
        }

        if let Some(ref command) = self.command {
            if !COMMAND_IDS.contains(&command.as_str()) {
                return Err(format!(
                    "Unknown command '{}'. Expected one of: {}",
                    command,
                    COMMAND_IDS.join(", ")
                ));
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// The document reference built from --document and --language.
    pub fn document(&self) -> Document {
        Document::new(
            self.document.clone().unwrap_or_default(),
            self.language.clone().unwrap_or_default(),
        )
        .with_version(self.document_version)
    }

    /// The query position.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// The category to resolve, taking --command into account.
    pub fn effective_category(&self) -> Category {
        self.command
            .as_deref()
            .and_then(Category::from_command_id)
            .unwrap_or_else(|| self.category.into())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
