//! The aggregate evaluated by every dimension.
//!
//! # Input Format
//!
//! ```json
//! {
//!   "entities":      [{"entity_name": "A", "entity_type": "Person"}],
//!   "relationships": [{"source_entity_name": "A", "target_entity_name": "B",
//!                      "description": "knows"}],
//!   "source_texts":  [{"content": "A knows B.", "linked_entity_names": ["A", "B"],
//!                      "linked_edges": [["A", "B"]]}]
//! }
//! ```
//!
//! `source_texts` may be omitted.
//!
//! ## Content Hash
//!
//! [`KnowledgeGraph::content_hash`] is a BLAKE3 hash over every record in
//! input order. Reports carry it so results can be matched back to the
//! exact input that produced them.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{Entity, Relationship, SourceText};
use crate::error::KgError;

/// Entities, relationships and source texts produced by one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub source_texts: Vec<SourceText>,
}

impl KnowledgeGraph {
    #[must_use]
    pub const fn new(
        entities: Vec<Entity>,
        relationships: Vec<Relationship>,
        source_texts: Vec<SourceText>,
    ) -> Self {
        Self {
            entities,
            relationships,
            source_texts,
        }
    }

    /// Parse a knowledge graph from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`KgError::Json`] if the document does not match the input
    /// format.
    pub fn from_json_str(json: &str) -> Result<Self, KgError> {
        let kg: Self = serde_json::from_str(json)?;
        debug!(%kg, "parsed knowledge graph");
        Ok(kg)
    }

    /// Read and parse a knowledge graph JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`KgError::Io`] if the file cannot be read and
    /// [`KgError::Json`] if it cannot be parsed.
    #[instrument]
    pub fn from_path(path: &Path) -> Result<Self, KgError> {
        let content = std::fs::read_to_string(path).map_err(|source| KgError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// All entity names in input order (duplicates included).
    #[must_use]
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.name.as_str()).collect()
    }

    /// First entity with the given name.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Relationships where `name` is the source or the target.
    #[must_use]
    pub fn relationships_for(&self, name: &str) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.source_name == name || r.target_name == name)
            .collect()
    }

    /// `true` when there are no entities and no relationships.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty()
    }

    /// BLAKE3 fingerprint of every record, in input order.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();

        hasher.update(b"entities\x00");
        for e in &self.entities {
            update_str(&mut hasher, &e.name);
            update_opt(&mut hasher, e.entity_type.as_deref());
            update_opt(&mut hasher, e.description.as_deref());
        }

        hasher.update(b"relationships\x00");
        for r in &self.relationships {
            update_str(&mut hasher, &r.source_name);
            update_str(&mut hasher, &r.target_name);
            update_str(&mut hasher, &r.description);
            match &r.keywords {
                Some(keywords) => {
                    hasher.update(b"\x01");
                    update_len(&mut hasher, keywords.len());
                    for k in keywords {
                        update_str(&mut hasher, k);
                    }
                }
                None => {
                    hasher.update(b"\x00");
                }
            }
            match r.weight {
                Some(w) => {
                    hasher.update(b"\x01");
                    hasher.update(&w.to_bits().to_le_bytes());
                }
                None => {
                    hasher.update(b"\x00");
                }
            }
        }

        hasher.update(b"source_texts\x00");
        for s in &self.source_texts {
            update_str(&mut hasher, &s.content);
            update_len(&mut hasher, s.linked_entity_names.len());
            for name in &s.linked_entity_names {
                update_str(&mut hasher, name);
            }
            update_len(&mut hasher, s.linked_edges.len());
            for (src, dst) in &s.linked_edges {
                update_str(&mut hasher, src);
                update_str(&mut hasher, dst);
            }
        }

        format!("blake3:{}", hasher.finalize())
    }
}

impl fmt::Display for KnowledgeGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KnowledgeGraph({} entities, {} relationships, {} source texts)",
            self.entities.len(),
            self.relationships.len(),
            self.source_texts.len()
        )
    }
}

/// Fields and lists are length-prefixed so no two inputs share a byte stream.
fn update_len(hasher: &mut blake3::Hasher, len: usize) {
    hasher.update(&(len as u64).to_le_bytes());
}

fn update_str(hasher: &mut blake3::Hasher, value: &str) {
    update_len(hasher, value.len());
    hasher.update(value.as_bytes());
}

fn update_opt(hasher: &mut blake3::Hasher, value: Option<&str>) {
    match value {
        Some(v) => {
            hasher.update(b"\x01");
            update_str(hasher, v);
        }
        None => {
            hasher.update(b"\x00");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KnowledgeGraph {
        KnowledgeGraph::new(
            vec![Entity::new("A"), Entity::new("B").with_type("Place")],
            vec![Relationship::new("A", "B", "lives in")],
            vec![SourceText::new("A lives in B.")
                .with_entities(["A", "B"])
                .with_edge("A", "B")],
        )
    }

    #[test]
    fn source_texts_default_to_empty() {
        let kg = KnowledgeGraph::from_json_str(r#"{"entities": [], "relationships": []}"#)
            .expect("parse");
        assert!(kg.is_empty());
        assert!(kg.source_texts.is_empty());
    }

    #[test]
    fn missing_entities_key_is_an_error() {
        let err = KnowledgeGraph::from_json_str(r#"{"relationships": []}"#).expect_err("no entities");
        assert!(matches!(err, KgError::Json(_)));
    }

    #[test]
    fn display_summarizes_counts() {
        assert_eq!(
            sample().to_string(),
            "KnowledgeGraph(2 entities, 1 relationships, 1 source texts)"
        );
    }

    #[test]
    fn relationships_for_matches_either_endpoint() {
        let kg = sample();
        assert_eq!(kg.relationships_for("A").len(), 1);
        assert_eq!(kg.relationships_for("B").len(), 1);
        assert!(kg.relationships_for("C").is_empty());
    }

    #[test]
    fn entity_lookup_by_name() {
        let kg = sample();
        assert_eq!(
            kg.entity("B").and_then(|e| e.entity_type.as_deref()),
            Some("Place")
        );
        assert!(kg.entity("Z").is_none());
        assert_eq!(kg.entity_names(), vec!["A", "B"]);
    }

    #[test]
    fn content_hash_is_stable_and_sensitive() {
        let kg = sample();
        let hash = kg.content_hash();
        assert!(hash.starts_with("blake3:"));
        assert_eq!(hash, sample().content_hash());

        let mut changed = sample();
        changed.relationships[0].weight = Some(0.5);
        assert_ne!(hash, changed.content_hash(), "weight must affect the hash");

        let mut changed = sample();
        changed.entities[0].description = Some(String::new());
        assert_ne!(
            hash,
            changed.content_hash(),
            "empty description differs from a missing one"
        );
    }

    #[test]
    fn content_hash_separates_fields_containing_nul() {
        let split = |name: &str, kind: &str| {
            KnowledgeGraph::new(vec![Entity::new(name).with_type(kind)], Vec::new(), Vec::new())
        };
        assert_ne!(
            split("A\x00\x01B", "C").content_hash(),
            split("A", "B\x00\x01C").content_hash()
        );

        let names = |list: &[&str]| {
            KnowledgeGraph::new(
                Vec::new(),
                Vec::new(),
                vec![SourceText::new("t").with_entities(list.iter().copied())],
            )
        };
        assert_ne!(names(&["a\x00b"]).content_hash(), names(&["a", "b"]).content_hash());
    }
}
