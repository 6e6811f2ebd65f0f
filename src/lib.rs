//! navlink - multi-provider definition resolution.
//!
//! Asks every registered definition, implementation or type-definition
//! provider for a document position and merges the answers into one
//! ordered list. Failing providers are reported out of band and never
//! fail the query.

pub mod cancellation;
pub mod cli;
pub mod config;
pub mod error;
pub mod fixture;
pub mod models;
pub mod navigation;
pub mod output;
pub mod providers;
pub mod registry;
pub mod sink;

pub use cancellation::{CancellationSource, CancellationToken};
pub use error::{CommandError, ConfigError, ProviderError, ProviderResult};
pub use models::{Category, DefinitionLink, Document, Position, ProviderResponse, Range};
pub use navigation::{get_definitions, CommandTable, DefinitionAggregator};
pub use providers::{DefinitionProvider, ImplementationProvider, TypeDefinitionProvider};
pub use registry::{DocumentSelector, LanguageFeatureRegistry, LanguageFeatures, RegistrationId};
pub use sink::{CollectingErrorSink, ErrorSink, TracingErrorSink};
