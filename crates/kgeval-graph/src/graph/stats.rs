//! Density statistics for a knowledge graph.
//!
//! # Statistics Provided
//!
//! - **relationship_density**: relationship records per entity record,
//!   `relationship_count / entity_count`. Counts input records, so merged
//!   duplicate edges and dangling endpoints still influence it. Zero when
//!   there are no entities.
//! - **directed_density**: ratio of actual edges to maximum possible edges
//!   for a directed graph, `edge_count / (node_count * (node_count - 1))`.
//!   Zero for graphs with 0 or 1 node. Self loops count as edges, so a
//!   graph full of them can exceed 1.0.
//!
//! The two disagree by design of their inputs; both are reported and
//! neither replaces the other.

use serde::{Deserialize, Serialize};

use super::build::KgGraph;

/// Both density definitions for one graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityStats {
    /// `relationship_count / entity_count`.
    pub relationship_density: f64,
    /// `edges / (nodes * (nodes - 1))`.
    pub directed_density: f64,
}

impl DensityStats {
    #[must_use]
    pub fn from_graph(graph: &KgGraph) -> Self {
        Self {
            relationship_density: relationship_density(
                graph.entity_count,
                graph.relationship_count,
            ),
            directed_density: directed_density(graph.node_count(), graph.edge_count()),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers (cast precision suppressed at function scope)
// ---------------------------------------------------------------------------

#[allow(clippy::cast_precision_loss)]
fn relationship_density(entity_count: usize, relationship_count: usize) -> f64 {
    if entity_count == 0 {
        return 0.0_f64;
    }
    relationship_count as f64 / entity_count as f64
}

#[allow(clippy::cast_precision_loss)]
fn directed_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
