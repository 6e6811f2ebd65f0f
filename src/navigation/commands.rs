//! Named commands for external callers.
//!
//! Each command resolves one category with no cancellation, the same
//! way an editor's command palette or an extension host would invoke it.

use crate::cancellation::CancellationToken;
use crate::error::CommandError;
use crate::models::{Category, DefinitionLink, Document, Position};
use crate::navigation::aggregator::DefinitionAggregator;
use tracing::debug;

/// Every command id this table answers to.
pub const COMMAND_IDS: [&str; 3] = [
    "_executeDefinitionProvider",
    "_executeImplementationProvider",
    "_executeTypeDefinitionProvider",
];

/// Dispatches command ids to the aggregator.
#[derive(Clone)]
pub struct CommandTable {
    aggregator: DefinitionAggregator,
}

impl CommandTable {
    pub fn new(aggregator: DefinitionAggregator) -> Self {
        Self { aggregator }
    }

    /// Registered command ids.
    pub fn ids(&self) -> &'static [&'static str] {
        &COMMAND_IDS
    }

    /// Run a command against `document` at `position`.
    pub async fn execute(
        &self,
        id: &str,
        document: &Document,
        position: Position,
    ) -> Result<Vec<DefinitionLink>, CommandError> {
        let category = Category::from_command_id(id)
            .ok_or_else(|| CommandError::UnknownCommand(id.to_string()))?;

        debug!("Executing {} as {} query", id, category);

        Ok(self
            .aggregator
            .resolve(category, document, position, &CancellationToken::none())
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderResult;
    use crate::models::{ProviderResponse, Range};
    use crate::providers::{DefinitionProvider, ImplementationProvider, TypeDefinitionProvider};
    use crate::registry::{DocumentSelector, LanguageFeatures};
    use crate::sink::TracingErrorSink;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Answers every capability with a link whose URI names the capability.
    struct EchoProvider;

    fn echo(kind: &str) -> ProviderResult<Option<ProviderResponse>> {
        Ok(Some(
            DefinitionLink::new(format!("echo:///{}", kind), Range::default()).into(),
        ))
    }

    #[async_trait]
    impl DefinitionProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn provide_definition(
            &self,
            _document: &Document,
            _position: Position,
            _token: &CancellationToken,
        ) -> ProviderResult<Option<ProviderResponse>> {
            echo("definition")
        }
    }

    #[async_trait]
    impl ImplementationProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn provide_implementation(
            &self,
            _document: &Document,
            _position: Position,
            _token: &CancellationToken,
        ) -> ProviderResult<Option<ProviderResponse>> {
            echo("implementation")
        }
    }

    #[async_trait]
    impl TypeDefinitionProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn provide_type_definition(
            &self,
            _document: &Document,
            _position: Position,
            token: &CancellationToken,
        ) -> ProviderResult<Option<ProviderResponse>> {
            assert!(!token.is_cancelled());
            echo("type-definition")
        }
    }

    fn table() -> CommandTable {
        let features = LanguageFeatures::new();
        features.register_all(DocumentSelector::language("*"), Arc::new(EchoProvider));
        CommandTable::new(DefinitionAggregator::new(
            Arc::new(features),
            Arc::new(TracingErrorSink),
        ))
    }

    #[test]
    fn test_command_ids_match_categories() {
        let table = table();
        assert_eq!(table.ids().len(), Category::ALL.len());
        for (id, category) in table.ids().iter().zip(Category::ALL) {
            assert_eq!(*id, category.command_id());
        }
    }

    #[test]
    fn test_execute_each_command() {
        let table = table();
        let document = Document::new("file:///main.go", "go");

        for (id, expected) in [
            ("_executeDefinitionProvider", "echo:///definition"),
            ("_executeImplementationProvider", "echo:///implementation"),
            ("_executeTypeDefinitionProvider", "echo:///type-definition"),
        ] {
            let links =
                tokio_test::block_on(table.execute(id, &document, Position::new(2, 4))).unwrap();
            assert_eq!(links.len(), 1);
            assert_eq!(links[0].uri, expected);
        }
    }

    #[test]
    fn test_unknown_command() {
        let table = table();
        let document = Document::new("file:///main.go", "go");

        let err = tokio_test::block_on(table.execute(
            "_executeHoverProvider",
            &document,
            Position::default(),
        ))
        .unwrap_err();

        assert!(matches!(err, CommandError::UnknownCommand(ref id) if id == "_executeHoverProvider"));
    }
}
