//! Data models for definition resolution.
//!
//! This module contains the values that flow through the aggregator:
//! documents, positions, definition links and the raw responses that
//! providers hand back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which navigation capability a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Go to definition
    Definition,
    /// Go to implementation
    Implementation,
    /// Go to type definition
    TypeDefinition,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Definition => write!(f, "definition"),
            Category::Implementation => write!(f, "implementation"),
            Category::TypeDefinition => write!(f, "type-definition"),
        }
    }
}

impl Category {
    /// All categories, in the order their commands are registered.
    pub const ALL: [Category; 3] = [
        Category::Definition,
        Category::Implementation,
        Category::TypeDefinition,
    ];

    /// Returns the externally invocable command id for this category.
    pub fn command_id(&self) -> &'static str {
        match self {
            Category::Definition => "_executeDefinitionProvider",
            Category::Implementation => "_executeImplementationProvider",
            Category::TypeDefinition => "_executeTypeDefinitionProvider",
        }
    }

    /// Looks up the category behind a command id.
    pub fn from_command_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.command_id() == id)
    }
}

/// A zero-based position in a text document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column
    #[serde(rename = "character", alias = "column")]
    pub column: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    /// Formats as `line:column`, 1-indexed for humans.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            u64::from(self.line) + 1,
            u64::from(self.column) + 1
        )
    }
}

/// A half-open span between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a new range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Reference to an open text document.
///
/// The aggregator never looks inside; only the registry reads the
/// language id and URI scheme to pick providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document URI (e.g. `file:///src/main.rs`).
    pub uri: String,
    /// Language identifier (e.g. `rust`).
    pub language_id: String,
    /// Version of the text buffer.
    #[serde(default)]
    pub version: i32,
}

impl Document {
    /// Creates a document reference at version 0.
    pub fn new(uri: impl Into<String>, language_id: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            language_id: language_id.into(),
            version: 0,
        }
    }

    /// Sets the buffer version.
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Returns the URI scheme, or an empty string for scheme-less URIs.
    ///
    /// A scheme is everything before the first `:`, provided it starts
    /// with a letter followed by letters, digits, `+`, `-` or `.`.
    pub fn scheme(&self) -> &str {
        let Some((scheme, _)) = self.uri.split_once(':') else {
            return "";
        };

        let mut chars = scheme.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

        if valid {
            scheme
        } else {
            ""
        }
    }
}

/// A navigation target returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionLink {
    /// URI of the target document.
    pub uri: String,
    /// Full range of the target (e.g. the whole declaration).
    pub range: Range,
    /// Span at the request site that this link originates from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_selection_range: Option<Range>,
    /// Span inside `range` to select when navigating (e.g. the name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_selection_range: Option<Range>,
}

impl DefinitionLink {
    /// Creates a link with only a target URI and range.
    pub fn new(uri: impl Into<String>, range: Range) -> Self {
        Self {
            uri: uri.into(),
            range,
            origin_selection_range: None,
            target_selection_range: None,
        }
    }

    /// Position an editor should jump to.
    pub fn target_position(&self) -> Position {
        self.target_selection_range
            .map(|r| r.start)
            .unwrap_or(self.range.start)
    }
}

impl fmt::Display for DefinitionLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.uri, self.target_position())
    }
}

/// What a provider returned: a bare link or a sequence of links.
///
/// A sequence may carry absent entries (`null` in JSON); those are
/// dropped when results are merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderResponse {
    Links(Vec<Option<DefinitionLink>>),
    Link(DefinitionLink),
}

impl ProviderResponse {
    /// Normalizes the response into a sequence, preserving order.
    pub fn into_links(self) -> Vec<Option<DefinitionLink>> {
        match self {
            ProviderResponse::Link(link) => vec![Some(link)],
            ProviderResponse::Links(links) => links,
        }
    }
}

impl From<DefinitionLink> for ProviderResponse {
    fn from(link: DefinitionLink) -> Self {
        ProviderResponse::Link(link)
    }
}

impl From<Vec<DefinitionLink>> for ProviderResponse {
    fn from(links: Vec<DefinitionLink>) -> Self {
        ProviderResponse::Links(links.into_iter().map(Some).collect())
    }
}
