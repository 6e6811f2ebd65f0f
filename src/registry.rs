//! Language-scoped provider registration.
//!
//! Providers register against a [`DocumentSelector`]. For a given
//! document the registry returns the matching providers ordered by how
//! well they match, then by recency of registration.

use crate::models::Document;
use crate::providers::{DefinitionProvider, ImplementationProvider, TypeDefinitionProvider};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::debug;

const EXACT_MATCH: u32 = 10;
const WILDCARD_MATCH: u32 = 5;

/// Filter deciding which documents a provider serves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSelector {
    /// Language id, or `"*"` for any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// URI scheme, or `"*"` for any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

impl DocumentSelector {
    /// Selector matching one language on any scheme.
    pub fn language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            scheme: None,
        }
    }

    /// Restrict the selector to a scheme.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Score how well this selector matches `document`. Zero means no match.
    pub fn score(&self, document: &Document) -> u32 {
        let fields = [
            (self.language.as_deref(), document.language_id.as_str()),
            (self.scheme.as_deref(), document.scheme()),
        ];

        let mut best = 0;
        for (wanted, actual) in fields {
            let Some(wanted) = wanted else { continue };
            let score = if wanted == actual {
                EXACT_MATCH
            } else if wanted == "*" {
                WILDCARD_MATCH
            } else {
                return 0;
            };
            best = best.max(score);
        }
        best
    }
}

/// Handle returned by [`LanguageFeatureRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

struct Entry<P> {
    id: RegistrationId,
    selector: DocumentSelector,
    provider: P,
}

struct Inner<P> {
    entries: Vec<Entry<P>>,
    next_id: u64,
}

/// Registry of providers for one capability.
///
/// `P` is usually an `Arc<dyn SomeProvider>`; `ordered` hands out clones
/// so no lock is held while providers run.
pub struct LanguageFeatureRegistry<P> {
    inner: RwLock<Inner<P>>,
}

impl<P: Clone> LanguageFeatureRegistry<P> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: Vec::new(),
                next_id: 0,
            }),
        }
    }

    /// Register a provider. Later registrations win ties against earlier ones.
    pub fn register(&self, selector: DocumentSelector, provider: P) -> RegistrationId {
        let mut inner = self.write();
        let id = RegistrationId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push(Entry {
            id,
            selector,
            provider,
        });
        id
    }

    /// Remove a registration. Returns false if it was already gone.
    pub fn unregister(&self, id: RegistrationId) -> bool {
        let mut inner = self.write();
        let before = inner.entries.len();
        inner.entries.retain(|e| e.id != id);
        inner.entries.len() != before
    }

    /// Whether any provider matches `document`.
    pub fn has(&self, document: &Document) -> bool {
        self.read()
            .entries
            .iter()
            .any(|e| e.selector.score(document) > 0)
    }

    /// All providers in registration order.
    pub fn all(&self) -> Vec<P> {
        self.read()
            .entries
            .iter()
            .map(|e| e.provider.clone())
            .collect()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Providers matching `document`, best score first, newest first on ties.
    pub fn ordered(&self, document: &Document) -> Vec<P> {
        let inner = self.read();

        let mut scored: Vec<(u32, RegistrationId, &P)> = inner
            .entries
            .iter()
            .map(|e| (e.selector.score(document), e.id, &e.provider))
            .filter(|(score, _, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(b.1 .0.cmp(&a.1 .0)));

        debug!(
            "{} of {} providers match {} ({})",
            scored.len(),
            inner.entries.len(),
            document.uri,
            document.language_id
        );

        scored.into_iter().map(|(_, _, p)| p.clone()).collect()
    }

    // Poisoning leaves the entry list intact.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner<P>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner<P>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl<P: Clone> Default for LanguageFeatureRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// One registry per navigation capability.
#[derive(Default)]
pub struct LanguageFeatures {
    pub definition: LanguageFeatureRegistry<Arc<dyn DefinitionProvider>>,
    pub implementation: LanguageFeatureRegistry<Arc<dyn ImplementationProvider>>,
    pub type_definition: LanguageFeatureRegistry<Arc<dyn TypeDefinitionProvider>>,
}

impl LanguageFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider that implements all three capabilities.
    pub fn register_all<T>(&self, selector: DocumentSelector, provider: Arc<T>)
    where
        T: DefinitionProvider + ImplementationProvider + TypeDefinitionProvider + 'static,
    {
        self.definition
            .register(selector.clone(), provider.clone() as Arc<dyn DefinitionProvider>);
        self.implementation
            .register(selector.clone(), provider.clone() as Arc<dyn ImplementationProvider>);
        self.type_definition
            .register(selector, provider as Arc<dyn TypeDefinitionProvider>);
    }
}
