//! Connected components of the undirected projection.
//!
//! An edge in either direction joins its endpoints. Components are found by
//! depth-first search from each unvisited node in node-index order, so the
//! component list is deterministic for a given input.

use std::collections::BTreeMap;

use petgraph::{Direction, graph::NodeIndex, visit::IntoNodeIdentifiers};
use serde::{Deserialize, Serialize};

use crate::graph::KgGraph;

// ---------------------------------------------------------------------------
// Component membership
// ---------------------------------------------------------------------------

/// Node sets of each weakly connected component, in discovery order.
///
/// Members within a component are listed in visit order.
#[must_use]
pub fn weak_components(graph: &KgGraph) -> Vec<Vec<NodeIndex>> {
    let g = &graph.graph;
    let mut visited = vec![false; g.node_count()];
    let mut components = Vec::new();

    for start in g.node_identifiers() {
        if visited[start.index()] {
            continue;
        }

        let mut stack = vec![start];
        let mut members = Vec::new();

        while let Some(node) = stack.pop() {
            if visited[node.index()] {
                continue;
            }
            visited[node.index()] = true;
            members.push(node);

            // Treat edges as undirected.
            for neighbor in g
                .neighbors_directed(node, Direction::Outgoing)
                .chain(g.neighbors_directed(node, Direction::Incoming))
            {
                if !visited[neighbor.index()] {
                    stack.push(neighbor);
                }
            }
        }

        components.push(members);
    }

    components
}

// ---------------------------------------------------------------------------
// Connectivity statistics
// ---------------------------------------------------------------------------

/// Fragmentation statistics for a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityStats {
    /// Number of weakly connected components.
    pub component_count: usize,
    /// Component sizes, largest first.
    pub sizes: Vec<usize>,
    /// `largest size / node count`; 1.0 for an empty graph.
    pub largest_component_ratio: f64,
    /// `size-1 components / node count`; 0.0 for an empty graph.
    pub singleton_ratio: f64,
    /// Mean component size; 0.0 for an empty graph.
    pub average_component_size: f64,
    /// Component size → number of components with that size.
    pub size_distribution: BTreeMap<usize, usize>,
}

impl ConnectivityStats {
    /// Statistics for a graph with no nodes.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            component_count: 0,
            sizes: Vec::new(),
            largest_component_ratio: 1.0,
            singleton_ratio: 0.0,
            average_component_size: 0.0,
            size_distribution: BTreeMap::new(),
        }
    }

    /// Size of the largest component (0 for an empty graph).
    #[must_use]
    pub fn largest_component_size(&self) -> usize {
        self.sizes.first().copied().unwrap_or(0)
    }

    /// Number of components with exactly one node.
    #[must_use]
    pub fn singleton_count(&self) -> usize {
        self.size_distribution.get(&1).copied().unwrap_or(0)
    }
}

/// Compute [`ConnectivityStats`] for `graph`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn connectivity(graph: &KgGraph) -> ConnectivityStats {
    let node_count = graph.node_count();
    if node_count == 0 {
        return ConnectivityStats::empty();
    }

    let mut sizes: Vec<usize> = weak_components(graph).iter().map(Vec::len).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a)); // descending

    let mut size_distribution = BTreeMap::new();
    for &size in &sizes {
        *size_distribution.entry(size).or_insert(0_usize) += 1;
    }

    let largest = sizes.first().copied().unwrap_or(0);
    let singletons = size_distribution.get(&1).copied().unwrap_or(0);
    let n = node_count as f64;

    ConnectivityStats {
        component_count: sizes.len(),
        largest_component_ratio: largest as f64 / n,
        singleton_ratio: singletons as f64 / n,
        average_component_size: n / sizes.len() as f64,
        size_distribution,
        sizes,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_defaults() {
        let stats = connectivity(&KgGraph::from_names(&[], &[]));
        assert_eq!(stats.component_count, 0);
        assert!((stats.largest_component_ratio - 1.0).abs() < f64::EPSILON);
        assert!(stats.singleton_ratio.abs() < f64::EPSILON);
        assert!(stats.average_component_size.abs() < f64::EPSILON);
        assert!(stats.size_distribution.is_empty());
        assert_eq!(stats.largest_component_size(), 0);
    }

    #[test]
    fn single_isolated_node() {
        let stats = connectivity(&KgGraph::from_names(&["A"], &[]));
        assert_eq!(stats.component_count, 1);
        assert!((stats.largest_component_ratio - 1.0).abs() < f64::EPSILON);
        assert!((stats.singleton_ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(stats.singleton_count(), 1);
    }

    #[test]
    fn direction_is_ignored() {
        // A → B ← C: one component even though C cannot reach A.
        let stats = connectivity(&KgGraph::from_names(&["A", "B", "C"], &[("A", "B"), ("C", "B")]));
        assert_eq!(stats.component_count, 1);
        assert_eq!(stats.sizes, vec![3]);
    }

    #[test]
    fn pair_plus_two_singletons() {
        let stats = connectivity(&KgGraph::from_names(&["A", "B", "C", "D"], &[("A", "B")]));
        assert_eq!(stats.component_count, 3);
        assert_eq!(stats.sizes, vec![2, 1, 1]);
        assert!((stats.singleton_ratio - 0.5).abs() < 1e-10);
        assert!((stats.largest_component_ratio - 0.5).abs() < 1e-10);
        assert!((stats.average_component_size - 4.0 / 3.0).abs() < 1e-10);
        assert_eq!(stats.size_distribution.get(&2), Some(&1));
        assert_eq!(stats.size_distribution.get(&1), Some(&2));
    }

    #[test]
    fn tied_largest_components() {
        // A-B and C-D: either may be "largest"; only the size matters.
        let stats = connectivity(&KgGraph::from_names(&["A", "B", "C", "D"], &[("A", "B"), ("C", "D")]));
        assert_eq!(stats.largest_component_size(), 2);
        assert!((stats.largest_component_ratio - 0.5).abs() < 1e-10);
        assert!(stats.singleton_ratio.abs() < f64::EPSILON);
    }

    #[test]
    fn self_loop_node_is_a_singleton_component() {
        let stats = connectivity(&KgGraph::from_names(&["A", "B"], &[("A", "A")]));
        assert_eq!(stats.component_count, 2);
        assert_eq!(stats.singleton_count(), 2);
    }

    #[test]
    fn membership_in_discovery_order() {
        let graph = KgGraph::from_names(&["A", "B", "C"], &[("C", "A")]);
        let comps = weak_components(&graph);
        assert_eq!(comps.len(), 2);
        let first: Vec<&str> = comps[0].iter().filter_map(|&i| graph.name(i)).collect();
        assert_eq!(first.len(), 2);
        assert!(first.contains(&"A") && first.contains(&"C"));
        assert_eq!(graph.name(comps[1][0]), Some("B"));
    }
}
