//! Definition aggregation across providers.
//!
//! Every provider registered for a document is asked concurrently. The
//! answers are joined in provider order, flattened and stripped of
//! absent entries. A provider that fails is reported to the error sink
//! and contributes nothing; it never fails the whole query.

use crate::cancellation::CancellationToken;
use crate::error::{ProviderError, ProviderResult};
use crate::models::{Category, DefinitionLink, Document, Position, ProviderResponse};
use crate::providers::NamedProvider;
use crate::registry::{LanguageFeatureRegistry, LanguageFeatures};
use crate::sink::ErrorSink;
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::debug;

/// Query every provider in `registry` that matches `document` and merge
/// their answers.
///
/// `provide` picks the capability to invoke on each provider. Results
/// keep the registry's provider order, and each provider's own order
/// within its group. Duplicates are kept.
pub async fn get_definitions<P, F>(
    registry: &LanguageFeatureRegistry<P>,
    document: &Document,
    position: Position,
    token: &CancellationToken,
    sink: &dyn ErrorSink,
    provide: F,
) -> Vec<DefinitionLink>
where
    P: Clone + NamedProvider,
    F: for<'a> Fn(
        &'a P,
        &'a Document,
        Position,
        &'a CancellationToken,
    ) -> BoxFuture<'a, ProviderResult<Option<ProviderResponse>>>,
{
    let providers = registry.ordered(document);
    let provide = &provide;

    let calls = providers.iter().map(|provider| async move {
        match invoke(provider, document, position, token, provide).await {
            Ok(response) => response,
            Err(e) => {
                debug!("Dropping results from {}: {}", provider.provider_name(), e);
                sink.report(&e);
                None
            }
        }
    });

    let responses = join_all(calls).await;

    let links: Vec<DefinitionLink> = responses
        .into_iter()
        .flatten()
        .flat_map(ProviderResponse::into_links)
        .flatten()
        .collect();

    debug!(
        "Resolved {} links from {} providers for {} (v{}) at {}",
        links.len(),
        providers.len(),
        document.uri,
        document.version,
        position
    );

    links
}

/// Run one provider call, turning panics into `ProviderError::Panicked`.
async fn invoke<'a, P, F>(
    provider: &'a P,
    document: &'a Document,
    position: Position,
    token: &'a CancellationToken,
    provide: &F,
) -> ProviderResult<Option<ProviderResponse>>
where
    P: NamedProvider,
    F: Fn(
        &'a P,
        &'a Document,
        Position,
        &'a CancellationToken,
    ) -> BoxFuture<'a, ProviderResult<Option<ProviderResponse>>>,
{
    let call = std::panic::catch_unwind(AssertUnwindSafe(|| {
        provide(provider, document, position, token)
    }));

    let future = match call {
        Ok(future) => future,
        Err(payload) => return Err(panicked(provider.provider_name(), payload)),
    };

    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(panicked(provider.provider_name(), payload)),
    }
}

fn panicked(provider: &str, payload: Box<dyn Any + Send>) -> ProviderError {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };

    ProviderError::Panicked {
        provider: provider.to_string(),
        message,
    }
}

/// Resolves navigation targets against a set of provider registries.
#[derive(Clone)]
pub struct DefinitionAggregator {
    features: Arc<LanguageFeatures>,
    sink: Arc<dyn ErrorSink>,
}

impl DefinitionAggregator {
    pub fn new(features: Arc<LanguageFeatures>, sink: Arc<dyn ErrorSink>) -> Self {
        Self { features, sink }
    }

    /// Resolve targets for `category` at `position`.
    ///
    /// Never fails: provider errors go to the sink and an empty result
    /// means nothing was found. `token` is handed to providers as-is.
    pub async fn resolve(
        &self,
        category: Category,
        document: &Document,
        position: Position,
        token: &CancellationToken,
    ) -> Vec<DefinitionLink> {
        match category {
            Category::Definition => self.definitions_at_position(document, position, token).await,
            Category::Implementation => {
                self.implementations_at_position(document, position, token)
                    .await
            }
            Category::TypeDefinition => {
                self.type_definitions_at_position(document, position, token)
                    .await
            }
        }
    }

    pub async fn definitions_at_position(
        &self,
        document: &Document,
        position: Position,
        token: &CancellationToken,
    ) -> Vec<DefinitionLink> {
        get_definitions(
            &self.features.definition,
            document,
            position,
            token,
            self.sink.as_ref(),
            |provider, document, position, token| {
                provider.provide_definition(document, position, token)
            },
        )
        .await
    }

    pub async fn implementations_at_position(
        &self,
        document: &Document,
        position: Position,
        token: &CancellationToken,
    ) -> Vec<DefinitionLink> {
        get_definitions(
            &self.features.implementation,
            document,
            position,
            token,
            self.sink.as_ref(),
            |provider, document, position, token| {
                provider.provide_implementation(document, position, token)
            },
        )
        .await
    }

    pub async fn type_definitions_at_position(
        &self,
        document: &Document,
        position: Position,
        token: &CancellationToken,
    ) -> Vec<DefinitionLink> {
        get_definitions(
            &self.features.type_definition,
            document,
            position,
            token,
            self.sink.as_ref(),
            |provider, document, position, token| {
                provider.provide_type_definition(document, position, token)
            },
        )
        .await
    }
}
