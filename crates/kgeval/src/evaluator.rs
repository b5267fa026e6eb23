//! The evaluation facade.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use kgeval_core::config::{Dimension, load_config};
use kgeval_core::{EvalConfig, KnowledgeGraph, Referee};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{info, instrument};

use crate::dimensions::{evaluate_efficiency, evaluate_richness, evaluate_semantic, evaluate_structure};
use crate::report::{EvaluationMetadata, EvaluationReport, Summary};

/// Runs the configured dimensions over a knowledge graph.
///
/// ```rust,ignore
/// use kgeval::{Evaluator, EvalConfig};
///
/// let evaluator = Evaluator::new(EvalConfig::default(), None);
/// let report = evaluator.evaluate(&kg);
/// let summary = evaluator.summary(&report);
/// ```
pub struct Evaluator {
    config: EvalConfig,
    referee: Option<Box<dyn Referee>>,
}

impl Evaluator {
    /// Create an evaluator. Without a referee the semantic dimension skips
    /// factual precision and contextual relevance.
    #[must_use]
    pub fn new(config: EvalConfig, referee: Option<Box<dyn Referee>>) -> Self {
        Self { config, referee }
    }

    /// Create an evaluator from a TOML config file (defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn from_config_path(path: &Path, referee: Option<Box<dyn Referee>>) -> Result<Self> {
        let config = load_config(path)?;
        Ok(Self::new(config, referee))
    }

    #[must_use]
    pub const fn config(&self) -> &EvalConfig {
        &self.config
    }

    #[must_use]
    pub fn has_referee(&self) -> bool {
        self.referee.is_some()
    }

    /// Evaluate `kg` across every configured dimension.
    ///
    /// Sampling for the referee-backed metrics is seeded from the config, so
    /// the same graph and config always produce the same report.
    #[must_use]
    #[instrument(skip_all, fields(kg = %kg))]
    pub fn evaluate(&self, kg: &KnowledgeGraph) -> EvaluationReport {
        let config = &self.config;
        let mut report = EvaluationReport {
            evaluation_metadata: EvaluationMetadata {
                kg_summary: kg.to_string(),
                content_hash: kg.content_hash(),
                referee_available: self.has_referee(),
                sample_size: config.sample_size,
                similarity_threshold: config.similarity_threshold,
                seed: config.seed,
                included_dimensions: config.dimensions.clone(),
            },
            scale_richness: None,
            structural_integrity: None,
            semantic_quality: None,
            efficiency: None,
        };

        for &dimension in &config.dimensions {
            info!(%dimension, "evaluating");
            match dimension {
                Dimension::ScaleRichness => {
                    report.scale_richness = Some(evaluate_richness(kg));
                }
                Dimension::StructuralIntegrity => {
                    report.structural_integrity = Some(evaluate_structure(kg, &config.pagerank));
                }
                Dimension::SemanticQuality => {
                    let mut rng = StdRng::seed_from_u64(config.seed);
                    report.semantic_quality = Some(evaluate_semantic(
                        kg,
                        self.referee.as_deref(),
                        config.similarity_threshold,
                        config.sample_size,
                        &mut rng,
                    ));
                }
                Dimension::Efficiency => {
                    report.efficiency = Some(evaluate_efficiency(kg));
                }
            }
        }

        info!(hash = %report.evaluation_metadata.content_hash, "evaluation complete");
        report
    }

    /// Load a knowledge graph JSON file and evaluate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn evaluate_path(&self, path: &Path) -> Result<EvaluationReport> {
        let kg = KnowledgeGraph::from_path(path)
            .with_context(|| format!("Failed to load knowledge graph {}", path.display()))?;
        Ok(self.evaluate(&kg))
    }

    /// Key metrics, composite score (with the configured weights) and
    /// recommendations for `report`.
    #[must_use]
    pub fn summary(&self, report: &EvaluationReport) -> Summary {
        report.summary(&self.config.weights)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvalConfig::default(), None)
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("config", &self.config)
            .field("referee", &self.has_referee())
            .finish()
    }
}
