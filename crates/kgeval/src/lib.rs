#![forbid(unsafe_code)]
//! kgeval library.
//!
//! Scores an LLM-extracted knowledge graph along four dimensions:
//!
//! | dimension              | record                                  |
//! |------------------------|-----------------------------------------|
//! | scale & richness       | [`dimensions::RichnessMetrics`]         |
//! | structural integrity   | [`dimensions::StructuralMetrics`]       |
//! | semantic quality       | [`dimensions::SemanticMetrics`]         |
//! | extraction efficiency  | [`dimensions::EfficiencyMetrics`]       |
//!
//! [`Evaluator`] runs the configured dimensions and returns an
//! [`EvaluationReport`]; [`Evaluator::summary`] condenses it into key
//! metrics, a weighted [`score::CompositeScore`] and recommendations.
//!
//! Semantic quality can consult a [`Referee`] for factual precision and
//! contextual relevance. Without one those two metrics are `None`.

pub mod dimensions;
pub mod evaluator;
pub mod report;
pub mod score;
pub mod similarity;

pub use evaluator::Evaluator;
pub use kgeval_core::{EvalConfig, KnowledgeGraph, Referee, Verdict};
pub use report::{EvaluationReport, Recommendation, Summary};
