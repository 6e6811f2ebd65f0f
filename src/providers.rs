//! Navigation capability traits.
//!
//! A provider implements one or more of these for the languages it
//! serves. Each capability may return a bare link, a sequence of links,
//! nothing, or an error.

use crate::cancellation::CancellationToken;
use crate::error::ProviderResult;
use crate::models::{Document, Position, ProviderResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Supplies "go to definition" targets.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the same provider may serve
/// concurrent requests.
#[async_trait]
pub trait DefinitionProvider: Send + Sync {
    /// Name used when reporting failures.
    fn name(&self) -> &str;

    /// Resolve definitions at `position`.
    ///
    /// * `Ok(Some(response))` - one or more targets
    /// * `Ok(None)` - nothing found
    /// * `Err(e)` - the lookup failed
    async fn provide_definition(
        &self,
        document: &Document,
        position: Position,
        token: &CancellationToken,
    ) -> ProviderResult<Option<ProviderResponse>>;
}

/// Supplies "go to implementation" targets.
#[async_trait]
pub trait ImplementationProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn provide_implementation(
        &self,
        document: &Document,
        position: Position,
        token: &CancellationToken,
    ) -> ProviderResult<Option<ProviderResponse>>;
}

/// Supplies "go to type definition" targets.
#[async_trait]
pub trait TypeDefinitionProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn provide_type_definition(
        &self,
        document: &Document,
        position: Position,
        token: &CancellationToken,
    ) -> ProviderResult<Option<ProviderResponse>>;
}

/// Gives the aggregator a name to report failures under, whatever the
/// capability.
pub trait NamedProvider {
    fn provider_name(&self) -> &str;
}

impl NamedProvider for Arc<dyn DefinitionProvider> {
    fn provider_name(&self) -> &str {
        self.name()
    }
}

impl NamedProvider for Arc<dyn ImplementationProvider> {
    fn provider_name(&self) -> &str {
        self.name()
    }
}

impl NamedProvider for Arc<dyn TypeDefinitionProvider> {
    fn provider_name(&self) -> &str {
        self.name()
    }
}
