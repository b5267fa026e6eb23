//! Structural-integrity evaluation.
//!
//! Collects density, connectivity and centrality statistics of one graph
//! into a flat [`StructuralMetrics`] record. Ratios are rounded to 4
//! decimal places, distribution statistics and top-entity scores to 6.

use std::collections::BTreeMap;

use kgeval_core::{ErrorCode, KnowledgeGraph};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::graph::{BuildDiagnostics, DensityStats, KgGraph};
use crate::metrics::{
    components::connectivity,
    degree::degree_centrality,
    distribution::{SummaryStats, round_to, shannon_entropy},
    pagerank::{PageRankConfig, PageRankMethod, pagerank},
};

/// Number of entities listed in [`StructuralMetrics::top_central_entities`].
pub const TOP_CENTRAL_COUNT: usize = 5;

const RATIO_PLACES: i32 = 4;
const STAT_PLACES: i32 = 6;

/// An entity and its PageRank score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    pub name: String,
    pub score: f64,
}

/// Structural statistics of one knowledge graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralMetrics {
    /// Relationship records per entity record.
    pub graph_density: f64,
    /// `edges / (nodes * (nodes - 1))`.
    pub directed_density: f64,
    pub largest_connected_component_ratio: f64,
    pub singleton_ratio: f64,
    pub connected_components_count: usize,
    pub average_component_size: f64,
    /// Component size → number of components with that size.
    pub component_size_distribution: BTreeMap<usize, usize>,
    pub average_degree_centrality: f64,
    /// Base-2 entropy of the PageRank distribution.
    pub pagerank_entropy: f64,
    /// Mean, std, max and min of degree centrality.
    pub centrality_distribution_stats: SummaryStats,
    /// Highest PageRank first.
    pub top_central_entities: Vec<RankedEntity>,
    pub pagerank_converged: bool,
    pub pagerank_iterations: usize,
    pub diagnostics: BuildDiagnostics,
}

impl StructuralMetrics {
    /// Metrics of a graph with no nodes.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            graph_density: 0.0,
            directed_density: 0.0,
            largest_connected_component_ratio: 1.0,
            singleton_ratio: 0.0,
            connected_components_count: 0,
            average_component_size: 0.0,
            component_size_distribution: BTreeMap::new(),
            average_degree_centrality: 0.0,
            pagerank_entropy: 0.0,
            centrality_distribution_stats: SummaryStats::default(),
            top_central_entities: Vec::new(),
            pagerank_converged: true,
            pagerank_iterations: 0,
            diagnostics: BuildDiagnostics::default(),
        }
    }

    /// Compute every structural statistic of an already built graph.
    #[must_use]
    pub fn from_graph(graph: &KgGraph, config: &PageRankConfig) -> Self {
        if graph.is_empty() {
            debug!(code = %ErrorCode::DegenerateGraph, "graph has no nodes, using defaults");
            return Self {
                diagnostics: graph.diagnostics.clone(),
                ..Self::empty()
            };
        }

        let density = DensityStats::from_graph(graph);
        let conn = connectivity(graph);
        let pr = pagerank(graph, config);
        let degree = degree_centrality(graph);

        let degree_values: Vec<f64> = degree.normalized.values().collect();
        let degree_stats = SummaryStats::from_values(&degree_values);
        let pr_values: Vec<f64> = pr.scores.values().collect();

        let top_central_entities = pr
            .scores
            .top(TOP_CENTRAL_COUNT)
            .into_iter()
            .map(|(name, score)| RankedEntity {
                name,
                score: round_to(score, STAT_PLACES),
            })
            .collect();

        Self {
            graph_density: round_to(density.relationship_density, RATIO_PLACES),
            directed_density: round_to(density.directed_density, RATIO_PLACES),
            largest_connected_component_ratio: round_to(
                conn.largest_component_ratio,
                RATIO_PLACES,
            ),
            singleton_ratio: round_to(conn.singleton_ratio, RATIO_PLACES),
            connected_components_count: conn.component_count,
            average_component_size: round_to(conn.average_component_size, RATIO_PLACES),
            component_size_distribution: conn.size_distribution,
            average_degree_centrality: round_to(degree_stats.mean, RATIO_PLACES),
            pagerank_entropy: round_to(shannon_entropy(&pr_values), RATIO_PLACES),
            centrality_distribution_stats: degree_stats.rounded(STAT_PLACES),
            top_central_entities,
            pagerank_converged: pr.method == PageRankMethod::PowerIteration,
            pagerank_iterations: pr.iterations,
            diagnostics: graph.diagnostics.clone(),
        }
    }
}

/// Build the graph for `kg` and compute its [`StructuralMetrics`].
#[must_use]
#[instrument(skip(kg, config), fields(entities = kg.entities.len(), relationships = kg.relationships.len()))]
pub fn evaluate_structure(kg: &KnowledgeGraph, config: &PageRankConfig) -> StructuralMetrics {
    let graph = KgGraph::from_knowledge_graph(kg);
    let codes = graph.diagnostics.codes();
    if !codes.is_empty() {
        let codes: Vec<&str> = codes.into_iter().map(ErrorCode::code).collect();
        warn!(
            codes = %codes.join(","),
            dangling = graph.diagnostics.dangling_endpoints.len(),
            duplicates = graph.diagnostics.duplicate_entities.len(),
            "input irregularities absorbed"
        );
    }
    let metrics = StructuralMetrics::from_graph(&graph, config);
    debug!(
        components = metrics.connected_components_count,
        lcc_ratio = metrics.largest_connected_component_ratio,
        converged = metrics.pagerank_converged,
        "structural metrics computed"
    );
    metrics
}
