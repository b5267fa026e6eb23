//! Weighted PageRank by power iteration.
//!
//! # Algorithm
//!
//! ```text
//! PR(v) = (1 - d) / N
//!       + d * Σ PR(u) * w(u, v) / W(u)     for each edge u → v
//!       + d * Σ PR(z) / N                  for each dangling z
//! ```
//!
//! where `d` is the damping factor, `w(u, v)` the edge weight and `W(u)` the
//! total outgoing weight of `u`. The builder keeps every weight positive, so
//! a node is dangling exactly when it has no outgoing edges. A dangling node
//! spreads its rank uniformly, so the scores always sum to 1.
//!
//! Iteration stops once the L1 change between rounds drops below
//! `N * tolerance`. If that never happens within `max_iter` rounds, or a
//! score becomes non-finite, the result falls back to the uniform
//! distribution and is marked with [`PageRankMethod::UniformFallback`].

use petgraph::visit::{EdgeRef, IntoNodeIdentifiers};
use tracing::{instrument, warn};

use kgeval_core::ErrorCode;
pub use kgeval_core::config::PageRankConfig;

use super::scores::NodeScores;
use crate::graph::KgGraph;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// One score per node, summing to 1 for a non-empty graph.
    pub scores: NodeScores,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the power iteration converged within `max_iter`.
    pub converged: bool,
    /// Which computation produced `scores`.
    pub method: PageRankMethod,
}

/// How the scores were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRankMethod {
    /// Power iteration converged.
    PowerIteration,
    /// Power iteration failed; every node got `1 / N`.
    UniformFallback,
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute weighted PageRank over `graph`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[instrument(skip(graph, config), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn pagerank(graph: &KgGraph, config: &PageRankConfig) -> PageRankResult {
    let g = &graph.graph;
    let n = g.node_count();

    if n == 0 {
        return PageRankResult {
            scores: NodeScores::default(),
            iterations: 0,
            converged: true,
            method: PageRankMethod::PowerIteration,
        };
    }

    let n_f64 = n as f64;
    let damping = config.damping;
    let base = (1.0 - damping) / n_f64;

    // Total outgoing weight per node; zero marks a node without out-edges.
    let mut out_weight = vec![0.0_f64; n];
    for edge in g.edge_references() {
        out_weight[edge.source().index()] += edge.weight().weight;
    }

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        let dangling_mass: f64 = g
            .node_identifiers()
            .filter(|idx| out_weight[idx.index()] <= 0.0)
            .map(|idx| ranks[idx.index()])
            .sum();
        let fill = damping.mul_add(dangling_mass / n_f64, base);
        new_ranks.fill(fill);

        for edge in g.edge_references() {
            let src = edge.source().index();
            let total = out_weight[src];
            if total > 0.0 {
                new_ranks[edge.target().index()] +=
                    damping * ranks[src] * edge.weight().weight / total;
            }
        }

        if new_ranks.iter().any(|r| !r.is_finite()) {
            break;
        }

        let delta: f64 = ranks
            .iter()
            .zip(&new_ranks)
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < n_f64 * config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            code = %ErrorCode::PageRankFallback,
            iterations,
            max_iter = config.max_iter,
            "pagerank did not converge, using uniform scores"
        );
        return PageRankResult {
            scores: NodeScores::from_graph(graph, vec![1.0 / n_f64; n]),
            iterations,
            converged: false,
            method: PageRankMethod::UniformFallback,
        };
    }

    PageRankResult {
        scores: NodeScores::from_graph(graph, ranks),
        iterations,
        converged,
        method: PageRankMethod::PowerIteration,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use kgeval_core::{Entity, KnowledgeGraph, Relationship};

    use super::*;

    fn default_config() -> PageRankConfig {
        PageRankConfig::default()
    }

    fn score(result: &PageRankResult, name: &str) -> f64 {
        result.scores.get(name).expect("node should have a score")
    }

    #[test]
    fn pagerank_empty_graph() {
        let result = pagerank(&KgGraph::from_names(&[], &[]), &default_config());
        assert!(result.scores.is_empty());
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn pagerank_single_node() {
        let result = pagerank(&KgGraph::from_names(&["A"], &[]), &default_config());
        assert!((score(&result, "A") - 1.0).abs() < 1e-6);
        assert!(result.converged);
    }

    #[test]
    fn pagerank_two_nodes_one_edge() {
        let result = pagerank(&KgGraph::from_names(&["A", "B"], &[("A", "B")]), &default_config());
        assert!(result.converged);
        assert!(score(&result, "B") > score(&result, "A"), "B receives A's rank");
    }

    #[test]
    fn pagerank_linear_chain() {
        let graph = KgGraph::from_names(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let result = pagerank(&graph, &default_config());
        let (a, b, c) = (score(&result, "A"), score(&result, "B"), score(&result, "C"));
        assert!(c > b, "C ({c}) should outrank B ({b})");
        assert!(b > a, "B ({b}) should outrank A ({a})");
    }

    #[test]
    fn pagerank_star_topology() {
        let graph = KgGraph::from_names(
            &["H", "A", "B", "C"],
            &[("A", "H"), ("B", "H"), ("C", "H")],
        );
        let result = pagerank(&graph, &default_config());
        let hub = score(&result, "H");
        for leaf in ["A", "B", "C"] {
            assert!(hub > score(&result, leaf), "hub should outrank {leaf}");
        }
        assert!((score(&result, "A") - score(&result, "B")).abs() < 1e-9);
    }

    #[test]
    fn pagerank_diamond() {
        let graph = KgGraph::from_names(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );
        let result = pagerank(&graph, &default_config());
        assert!((score(&result, "B") - score(&result, "C")).abs() < 1e-9);
        assert!(score(&result, "D") > score(&result, "B"));
    }

    #[test]
    fn pagerank_cycle_is_uniform() {
        let graph = KgGraph::from_names(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        let result = pagerank(&graph, &default_config());
        for name in ["A", "B", "C"] {
            assert!((score(&result, name) - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn pagerank_scores_sum_to_one() {
        let graph = KgGraph::from_names(
            &["A", "B", "C", "D", "E"],
            &[("A", "B"), ("B", "C"), ("A", "D"), ("D", "D")],
        );
        let result = pagerank(&graph, &default_config());
        assert!((result.scores.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn pagerank_all_disconnected_is_uniform() {
        let graph = KgGraph::from_names(&["A", "B", "C", "D"], &[]);
        let result = pagerank(&graph, &default_config());
        assert!(result.converged);
        for (_, s) in result.scores.iter() {
            assert!((s - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn pagerank_max_iter_zero_falls_back_to_uniform() {
        let graph = KgGraph::from_names(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let config = PageRankConfig {
            max_iter: 0,
            ..default_config()
        };
        let result = pagerank(&graph, &config);
        assert!(!result.converged);
        assert_eq!(result.method, PageRankMethod::UniformFallback);
        for (_, s) in result.scores.iter() {
            assert!((s - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn pagerank_max_iter_limit_falls_back() {
        let graph = KgGraph::from_names(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let config = PageRankConfig {
            max_iter: 1,
            tolerance: 1e-15,
            ..default_config()
        };
        let result = pagerank(&graph, &config);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.method, PageRankMethod::UniformFallback);
    }

    #[test]
    fn pagerank_custom_damping() {
        let graph = KgGraph::from_names(&["A", "B"], &[("A", "B")]);
        let low = pagerank(&graph, &PageRankConfig { damping: 0.5, ..default_config() });
        let high = pagerank(&graph, &PageRankConfig { damping: 0.95, ..default_config() });
        let gap = |r: &PageRankResult| score(r, "B") - score(r, "A");
        assert!(gap(&high) > gap(&low), "higher damping follows links more");
    }

    #[test]
    fn pagerank_weight_steers_rank() {
        let kg = KnowledgeGraph::new(
            vec![Entity::new("S"), Entity::new("Heavy"), Entity::new("Light")],
            vec![
                Relationship::new("S", "Heavy", "").with_weight(9.0),
                Relationship::new("S", "Light", "").with_weight(1.0),
            ],
            Vec::new(),
        );
        let result = pagerank(&KgGraph::from_knowledge_graph(&kg), &default_config());
        assert!(score(&result, "Heavy") > score(&result, "Light"));
        assert!((result.scores.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn pagerank_zero_weight_edge_counts_as_unit_weight() {
        let kg = KnowledgeGraph::new(
            vec![Entity::new("A"), Entity::new("B")],
            vec![Relationship::new("A", "B", "").with_weight(0.0)],
            Vec::new(),
        );
        let result = pagerank(&KgGraph::from_knowledge_graph(&kg), &default_config());
        // Same as an unweighted A → B: A = 0.5 / 1.425, B = 1 - A.
        assert!((score(&result, "A") - 0.5 / 1.425).abs() < 1e-5);
        assert!((score(&result, "B") - (1.0 - 0.5 / 1.425)).abs() < 1e-5);
        assert!(score(&result, "B") > score(&result, "A"));
    }

    #[test]
    fn pagerank_is_deterministic() {
        let graph = KgGraph::from_names(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "A"), ("D", "A")],
        );
        let first = pagerank(&graph, &default_config());
        let second = pagerank(&graph, &default_config());
        assert_eq!(first.scores, second.scores);
        assert_eq!(first.iterations, second.iterations);
    }
}
