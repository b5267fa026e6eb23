//! The three dimensions computed in this crate.
//!
//! Structural integrity lives in `kgeval-graph`; its record is re-exported
//! here so all four sit side by side.

pub mod efficiency;
pub mod richness;
pub mod semantic;

pub use efficiency::{EfficiencyMetrics, evaluate_efficiency};
pub use kgeval_graph::{StructuralMetrics, evaluate_structure};
pub use richness::{RichnessMetrics, evaluate_richness};
pub use semantic::{SemanticMetrics, evaluate_semantic};
