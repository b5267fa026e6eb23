//! Graph construction for structural metrics.
//!
//! # Overview
//!
//! [`build::KgGraph`] turns a [`kgeval_core::KnowledgeGraph`] into a
//! directed petgraph graph. Nodes are entity names, edges are
//! `source → target` relationships. Whatever the builder had to tolerate
//! along the way (dangling endpoints, repeated names, merged edges) is
//! recorded in [`diagnostics::BuildDiagnostics`].
//!
//! [`stats::DensityStats`] reports both density definitions over the built
//! graph.
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use kgeval_graph::graph::{KgGraph, DensityStats};
//!
//! let graph = KgGraph::from_knowledge_graph(&kg);
//! let density = DensityStats::from_graph(&graph);
//!
//! println!("nodes={} edges={} ratio={:.3}",
//!     graph.node_count(), graph.edge_count(), density.relationship_density);
//! ```

pub mod build;
pub mod diagnostics;
pub mod stats;

pub use build::{EdgeAttrs, KgGraph, NodeAttrs};
pub use diagnostics::BuildDiagnostics;
pub use stats::DensityStats;
