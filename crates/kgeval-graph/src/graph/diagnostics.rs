//! Record of input irregularities absorbed while building the graph.

use kgeval_core::ErrorCode;
use serde::{Deserialize, Serialize};

/// What [`KgGraph::from_knowledge_graph`](super::KgGraph::from_knowledge_graph)
/// had to tolerate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDiagnostics {
    /// Relationship endpoints that named no entity, in first-seen order.
    pub dangling_endpoints: Vec<String>,
    /// Entity names seen more than once (one entry per repeat).
    pub duplicate_entities: Vec<String>,
    /// Relationships whose `(source, target)` pair already had an edge.
    pub merged_duplicate_edges: usize,
    /// Relationships whose source and target are the same entity.
    pub self_loops: usize,
    /// Relationship weights that were zero, negative or non-finite.
    pub sanitized_weights: usize,
}

impl BuildDiagnostics {
    /// `true` if the input was free of irregularities.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dangling_endpoints.is_empty()
            && self.duplicate_entities.is_empty()
            && self.merged_duplicate_edges == 0
            && self.self_loops == 0
            && self.sanitized_weights == 0
    }

    /// Error codes for the conditions that carry one.
    #[must_use]
    pub fn codes(&self) -> Vec<ErrorCode> {
        let mut codes = Vec::new();
        if !self.dangling_endpoints.is_empty() {
            codes.push(ErrorCode::DanglingReference);
        }
        if !self.duplicate_entities.is_empty() {
            codes.push(ErrorCode::DuplicateEntity);
        }
        codes
    }
}
