//! Knowledge graph data model.
//!
//! A [`KnowledgeGraph`] is the unit of evaluation: the entities and
//! relationships an extraction model produced, plus the [`SourceText`]
//! chunks they were extracted from. It is deserialized once per run and
//! never mutated during evaluation.
//!
//! Source texts refer to entities by name only. Relationship endpoints are
//! also plain names and may point at entities that were never emitted; the
//! graph layer tolerates those rather than rejecting the input.

pub mod entity;
pub mod knowledge_graph;
pub mod relationship;
pub mod source_text;

pub use entity::Entity;
pub use knowledge_graph::KnowledgeGraph;
pub use relationship::Relationship;
pub use source_text::SourceText;
