//! Rendering of resolved targets.

use crate::error::ProviderError;
use crate::models::{Category, DefinitionLink, Document, Position};
use anyhow::Result;
use serde::Serialize;

/// Everything printed for one query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub category: Category,
    pub document: Document,
    pub position: Position,
    pub links: Vec<DefinitionLink>,
    /// Provider failures that were skipped while resolving.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

impl Resolution {
    pub fn new(
        category: Category,
        document: Document,
        position: Position,
        links: Vec<DefinitionLink>,
        failures: &[ProviderError],
    ) -> Self {
        Self {
            category,
            document,
            position,
            links,
            failures: failures.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Plain text: one `uri:line:column` target per line, failures last.
pub fn render_text(resolution: &Resolution) -> String {
    let mut output = String::new();

    if resolution.links.is_empty() {
        output.push_str(&format!(
            "No {} found at {}:{}\n",
            resolution.category, resolution.document.uri, resolution.position
        ));
    }

    for link in &resolution.links {
        output.push_str(&format!("{}\n", link));
    }

    for failure in &resolution.failures {
        output.push_str(&format!("! {}\n", failure));
    }

    output
}

/// Pretty-printed JSON of the whole resolution.
pub fn render_json(resolution: &Resolution) -> Result<String> {
    let json = serde_json::to_string_pretty(resolution)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Range;

    fn create_test_resolution(links: Vec<DefinitionLink>) -> Resolution {
        Resolution::new(
            Category::Definition,
            Document::new("file:///src/main.rs", "rust").with_version(2),
            Position::new(3, 7),
            links,
            &[ProviderError::failed("ctags", "index not ready")],
        )
    }

    #[test]
    fn test_render_text() {
        let resolution = create_test_resolution(vec![
            DefinitionLink::new(
                "file:///src/lib.rs",
                Range::new(Position::new(11, 0), Position::new(11, 24)),
            ),
            DefinitionLink::new(
                "file:///src/compat.rs",
                Range::new(Position::new(3, 4), Position::new(3, 20)),
            ),
        ]);

        let text = render_text(&resolution);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "file:///src/lib.rs:12:1",
                "file:///src/compat.rs:4:5",
                "! Provider 'ctags' failed: index not ready",
            ]
        );
    }

    #[test]
    fn test_render_text_empty() {
        let text = render_text(&create_test_resolution(vec![]));
        assert!(text.starts_with("No definition found at file:///src/main.rs:4:8"));
    }

    #[test]
    fn test_render_json() {
        let resolution = create_test_resolution(vec![DefinitionLink::new(
            "file:///src/lib.rs",
            Range::default(),
        )]);

        let json = render_json(&resolution).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["category"], "definition");
        assert_eq!(value["document"]["languageId"], "rust");
        assert_eq!(value["document"]["version"], 2);
        assert_eq!(value["position"]["character"], 7);
        assert_eq!(value["links"][0]["uri"], "file:///src/lib.rs");
        assert_eq!(value["failures"].as_array().map(|f| f.len()), Some(1));
    }
}
