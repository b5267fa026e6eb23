//! Connectivity and centrality metrics over a [`KgGraph`].
//!
//! # Overview
//!
//! - **Components** (`components`): how fragmented is the graph once edge
//!   direction is ignored?
//! - **PageRank** (`pagerank`): which entities does the relationship
//!   structure point at?
//! - **Degree centrality** (`degree`): which entities touch the most
//!   relationships?
//! - **Distribution helpers** (`distribution`): entropy and summary
//!   statistics of a score vector.
//!
//! Per-node results come back as [`NodeScores`], ordered by node index
//! (the builder's insertion order).
//!
//! ```rust,ignore
//! use kgeval_graph::metrics::{components::connectivity, degree::degree_centrality,
//!     pagerank::{pagerank, PageRankConfig}};
//!
//! let conn = connectivity(&graph);
//! let pr = pagerank(&graph, &PageRankConfig::default());
//! let dc = degree_centrality(&graph);
//! ```
//!
//! [`KgGraph`]: crate::graph::KgGraph

pub mod components;
pub mod degree;
pub mod distribution;
pub mod pagerank;
pub mod scores;

pub use scores::NodeScores;
