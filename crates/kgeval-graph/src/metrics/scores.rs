use serde::{Deserialize, Serialize};

use crate::graph::KgGraph;

/// A score per node, in node-index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeScores {
    entries: Vec<(String, f64)>,
}

impl NodeScores {
    /// Pair `values[i]` with the name of node `i`.
    ///
    /// `values` must have one entry per node.
    #[must_use]
    pub fn from_graph(graph: &KgGraph, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), graph.node_count());
        Self {
            entries: graph.names().map(str::to_string).zip(values).collect(),
        }
    }

    /// Score of the named node.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), *s))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, s)| *s)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values().sum()
    }

    /// The `k` highest scores, descending.
    ///
    /// Equal scores keep node-index order. That order reflects input order
    /// only and carries no meaning.
    #[must_use]
    pub fn top(&self, k: usize) -> Vec<(String, f64)> {
        let mut ranked: Vec<&(String, f64)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.into_iter().take(k).cloned().collect()
    }
}
