//! Config-driven providers with canned answers.
//!
//! A [`FixtureProvider`] answers all three capabilities from a list of
//! [`FixtureAnswer`]s loaded from the manifest. It can simulate slow,
//! failing and panicking language servers.

use crate::cancellation::CancellationToken;
use crate::error::{ProviderError, ProviderResult};
use crate::models::{Category, DefinitionLink, Document, Position, ProviderResponse};
use crate::providers::{DefinitionProvider, ImplementationProvider, TypeDefinitionProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// One canned answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureAnswer {
    /// Capability this answer serves.
    pub category: Category,

    /// Only answer on this line (any line when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Only answer at this column (any column when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    /// Simulated latency before answering.
    #[serde(default)]
    pub delay_ms: u64,

    /// Fail with this message instead of answering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Panic instead of answering.
    #[serde(default)]
    pub panic: bool,

    /// Answer with a bare link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<DefinitionLink>,

    /// Answer with a sequence of links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<DefinitionLink>>,
}

impl FixtureAnswer {
    /// An answer for `category` at any position returning nothing.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            line: None,
            column: None,
            delay_ms: 0,
            error: None,
            panic: false,
            link: None,
            links: None,
        }
    }

    /// Whether this answer applies to a request.
    pub fn matches(&self, category: Category, position: Position) -> bool {
        self.category == category
            && self.line.map_or(true, |line| line == position.line)
            && self.column.map_or(true, |column| column == position.column)
    }

    fn respond(&self, provider: &str) -> ProviderResult<Option<ProviderResponse>> {
        if let Some(ref message) = self.error {
            return Err(ProviderError::failed(provider, message.clone()));
        }
        if self.panic {
            panic!("fixture provider '{}' configured to panic", provider);
        }

        Ok(match (&self.link, &self.links) {
            (Some(link), _) => Some(ProviderResponse::Link(link.clone())),
            (None, Some(links)) => Some(links.clone().into()),
            (None, None) => None,
        })
    }
}

/// Provider answering from a fixed list; the first matching answer wins.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    name: String,
    answers: Vec<FixtureAnswer>,
}

impl FixtureProvider {
    pub fn new(name: impl Into<String>, answers: Vec<FixtureAnswer>) -> Self {
        Self {
            name: name.into(),
            answers,
        }
    }

    async fn answer(
        &self,
        category: Category,
        position: Position,
        token: &CancellationToken,
    ) -> ProviderResult<Option<ProviderResponse>> {
        let Some(answer) = self.answers.iter().find(|a| a.matches(category, position)) else {
            debug!("{}: no {} answer at {}", self.name, category, position);
            return Ok(None);
        };

        if answer.delay_ms > 0 {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(answer.delay_ms)) => {}
                _ = token.cancelled() => {
                    debug!("{}: cancelled while waiting", self.name);
                    return Ok(None);
                }
            }
        }

        if token.is_cancelled() {
            return Ok(None);
        }

        answer.respond(&self.name)
    }
}

#[async_trait]
impl DefinitionProvider for FixtureProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn provide_definition(
        &self,
        _document: &Document,
        position: Position,
        token: &CancellationToken,
    ) -> ProviderResult<Option<ProviderResponse>> {
        self.answer(Category::Definition, position, token).await
    }
}

#[async_trait]
impl ImplementationProvider for FixtureProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn provide_implementation(
        &self,
        _document: &Document,
        position: Position,
        token: &CancellationToken,
    ) -> ProviderResult<Option<ProviderResponse>> {
        self.answer(Category::Implementation, position, token).await
    }
}

#[async_trait]
impl TypeDefinitionProvider for FixtureProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn provide_type_definition(
        &self,
        _document: &Document,
        position: Position,
        token: &CancellationToken,
    ) -> ProviderResult<Option<ProviderResponse>> {
        self.answer(Category::TypeDefinition, position, token).await
    }
}
