use serde::{Deserialize, Serialize};
use std::fmt;

/// A chunk of original text and the knowledge extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceText {
    pub content: String,
    /// Names of entities extracted from this chunk.
    #[serde(default)]
    pub linked_entity_names: Vec<String>,
    /// `(source, target)` pairs of relationships extracted from this chunk.
    #[serde(default)]
    pub linked_edges: Vec<(String, String)>,
}

impl SourceText {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            linked_entity_names: Vec::new(),
            linked_edges: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_entities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.linked_entity_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_edge(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.linked_edges.push((source.into(), target.into()));
        self
    }

    /// Length of the content in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether any entity or edge was extracted from this chunk.
    #[must_use]
    pub fn is_productive(&self) -> bool {
        !self.linked_entity_names.is_empty() || !self.linked_edges.is_empty()
    }

    #[must_use]
    pub fn links_entity(&self, name: &str) -> bool {
        self.linked_entity_names.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn links_edge(&self, source: &str, target: &str) -> bool {
        self.linked_edges
            .iter()
            .any(|(s, t)| s == source && t == target)
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SourceText({} chars, {} entities, {} edges)",
            self.char_len(),
            self.linked_entity_names.len(),
            self.linked_edges.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_parse_from_json_pairs() {
        let s: SourceText = serde_json::from_str(
            r#"{"content": "A met B.", "linked_entity_names": ["A", "B"], "linked_edges": [["A", "B"]]}"#,
        )
        .expect("parse source text");
        assert!(s.links_edge("A", "B"));
        assert!(!s.links_edge("B", "A"));
        assert!(s.links_entity("A"));
    }

    #[test]
    fn link_lists_default_to_empty() {
        let s: SourceText = serde_json::from_str(r#"{"content": "nothing"}"#).expect("parse");
        assert!(!s.is_productive());
    }

    #[test]
    fn char_len_counts_chars_not_bytes() {
        let s = SourceText::new("café");
        assert_eq!(s.char_len(), 4);
        assert_eq!(s.to_string(), "SourceText(4 chars, 0 entities, 0 edges)");
    }
}
