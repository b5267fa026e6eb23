#![forbid(unsafe_code)]
//! kgeval-graph library.
//!
//! Structural-integrity evaluation of a knowledge graph: the entity and
//! relationship records are projected onto a petgraph [`DiGraph`], then
//! density, connectivity and centrality statistics are computed over it.
//!
//! ```text
//! KnowledgeGraph
//!        ↓  graph::KgGraph::from_knowledge_graph()
//! KgGraph (DiGraph<NodeAttrs, EdgeAttrs> + diagnostics)
//!        ├─ graph::stats::DensityStats
//!        ├─ metrics::components::ConnectivityStats
//!        ├─ metrics::pagerank::pagerank
//!        └─ metrics::degree::degree_centrality
//!        ↓  structural::StructuralMetrics::from_graph()
//! StructuralMetrics
//! ```
//!
//! Nothing in this crate returns an error for odd input. Dangling
//! references become implicit nodes, empty graphs get documented default
//! values, and a PageRank run that does not converge falls back to the
//! uniform distribution.
//!
//! [`DiGraph`]: petgraph::graph::DiGraph

pub mod graph;
pub mod metrics;
pub mod structural;

pub use graph::{BuildDiagnostics, DensityStats, KgGraph};
pub use structural::{StructuralMetrics, evaluate_structure};
