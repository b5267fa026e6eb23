//! Degree centrality.
//!
//! Normalized degree is `(in + out) / (N - 1)`, the fraction of other nodes
//! a node could be linked to. A self loop adds one to both in- and
//! out-degree, so scores above 1.0 are possible in graphs with self loops.
//! With one node or none, every score is 0.

use petgraph::{Direction, visit::IntoNodeIdentifiers};

use super::scores::NodeScores;
use crate::graph::KgGraph;

/// Per-node degree counts and normalized centrality.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeCentrality {
    /// In-degree by node index.
    pub in_degree: Vec<usize>,
    /// Out-degree by node index.
    pub out_degree: Vec<usize>,
    /// `(in + out) / (N - 1)` per node.
    pub normalized: NodeScores,
}

impl DegreeCentrality {
    /// Total degree (in + out) of the named node.
    #[must_use]
    pub fn total_degree(&self, graph: &KgGraph, name: &str) -> Option<usize> {
        let idx = graph.node_index(name)?.index();
        Some(self.in_degree[idx] + self.out_degree[idx])
    }
}

/// Compute degree centrality for every node.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(graph: &KgGraph) -> DegreeCentrality {
    let g = &graph.graph;
    let n = g.node_count();

    let mut in_degree = vec![0_usize; n];
    let mut out_degree = vec![0_usize; n];

    for idx in g.node_identifiers() {
        in_degree[idx.index()] = g.neighbors_directed(idx, Direction::Incoming).count();
        out_degree[idx.index()] = g.neighbors_directed(idx, Direction::Outgoing).count();
    }

    let values = if n <= 1 {
        vec![0.0; n]
    } else {
        let scale = 1.0 / (n - 1) as f64;
        in_degree
            .iter()
            .zip(&out_degree)
            .map(|(i, o)| (i + o) as f64 * scale)
            .collect()
    };

    DegreeCentrality {
        normalized: NodeScores::from_graph(graph, values),
        in_degree,
        out_degree,
    }
}
