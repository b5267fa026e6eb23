use kgeval_core::config::{CompositeWeights, Dimension};
use serde::{Deserialize, Serialize};

use crate::report::EvaluationReport;

/// Knowledge density per chunk at which the efficiency score saturates.
const DENSITY_CAP: f64 = 5.0;

/// One dimension's contribution to a [`CompositeScore`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub dimension: Dimension,
    /// Dimension score in `[0, 1]`.
    pub value: f64,
    /// Configured weight before renormalization.
    pub weight: f64,
}

/// Weighted mean of the dimension scores present in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Overall score in `[0, 1]`.
    pub score: f64,
    /// Per-dimension inputs, in report order.
    pub components: Vec<ComponentScore>,
}

/// Map each evaluated dimension to a score in `[0, 1]`.
///
/// - richness: overall property fill rate
/// - structure: largest-component ratio
/// - semantic: mean of normalization score and factual precision (when judged)
/// - efficiency: knowledge density per chunk, capped at 5, divided by 5
#[must_use]
pub fn dimension_scores(report: &EvaluationReport) -> Vec<(Dimension, f64)> {
    let mut scores = Vec::with_capacity(4);

    if let Some(richness) = &report.scale_richness {
        scores.push((
            Dimension::ScaleRichness,
            normalize_unit(richness.overall_property_fill_rate),
        ));
    }
    if let Some(structure) = &report.structural_integrity {
        scores.push((
            Dimension::StructuralIntegrity,
            normalize_unit(structure.largest_connected_component_ratio),
        ));
    }
    if let Some(semantic) = &report.semantic_quality {
        let normalization = normalize_unit(semantic.entity_normalization_score);
        let value = semantic.factual_precision.map_or(normalization, |precision| {
            f64::midpoint(normalization, normalize_unit(precision))
        });
        scores.push((Dimension::SemanticQuality, value));
    }
    if let Some(efficiency) = &report.efficiency {
        scores.push((
            Dimension::Efficiency,
            normalize_unit(efficiency.knowledge_density_per_chunk.min(DENSITY_CAP) / DENSITY_CAP),
        ));
    }

    scores
}

/// Combine the dimensions present in `report` into one score.
///
/// Weights are renormalized over the dimensions present, so a report
/// without a semantic section is scored on the other three alone. A report
/// with no dimensions, or whose present dimensions all weigh zero, scores
/// 0.0.
#[must_use]
pub fn composite_score(report: &EvaluationReport, weights: &CompositeWeights) -> CompositeScore {
    let components: Vec<ComponentScore> = dimension_scores(report)
        .into_iter()
        .map(|(dimension, value)| ComponentScore {
            dimension,
            value,
            weight: sanitize_weight(weights.weight(dimension)),
        })
        .collect();

    let total_weight: f64 = components.iter().map(|c| c.weight).sum();
    let score = if total_weight > 0.0 {
        let weighted: f64 = components.iter().map(|c| c.weight * c.value).sum();
        normalize_unit(weighted / total_weight)
    } else {
        0.0
    };

    CompositeScore { score, components }
}

fn normalize_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    value.clamp(0.0, 1.0)
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() { weight.max(0.0) } else { 0.0 }
}
