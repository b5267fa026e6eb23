//! Evaluation report, key-metric summary and recommendations.

use std::fmt;

use kgeval_core::config::{CompositeWeights, Dimension};
use serde::{Deserialize, Serialize};

use crate::dimensions::{EfficiencyMetrics, RichnessMetrics, SemanticMetrics, StructuralMetrics};
use crate::score::{CompositeScore, composite_score};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// What was evaluated and with which settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetadata {
    /// `KnowledgeGraph(N entities, M relationships, K source texts)`.
    pub kg_summary: String,
    /// BLAKE3 fingerprint of the evaluated input.
    pub content_hash: String,
    pub referee_available: bool,
    pub sample_size: usize,
    pub similarity_threshold: f64,
    pub seed: u64,
    pub included_dimensions: Vec<Dimension>,
}

/// Results of one evaluation run. Dimensions that were not requested are
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub evaluation_metadata: EvaluationMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_richness: Option<RichnessMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural_integrity: Option<StructuralMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_quality: Option<SemanticMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<EfficiencyMetrics>,
}

impl EvaluationReport {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Key metrics, composite score and recommendations.
    #[must_use]
    pub fn summary(&self, weights: &CompositeWeights) -> Summary {
        Summary {
            key_metrics: KeyMetrics::from_report(self),
            composite: composite_score(self, weights),
            recommendations: recommendations(self),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Headline numbers pulled from each dimension that ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub total_entities: Option<usize>,
    pub total_relationships: Option<usize>,
    pub property_fill_rate: Option<f64>,
    pub graph_density: Option<f64>,
    pub lcc_ratio: Option<f64>,
    pub singleton_ratio: Option<f64>,
    pub entity_normalization_score: Option<f64>,
    pub factual_precision: Option<f64>,
    pub knowledge_density: Option<f64>,
}

impl KeyMetrics {
    fn from_report(report: &EvaluationReport) -> Self {
        let mut key = Self::default();
        if let Some(sr) = &report.scale_richness {
            key.total_entities = Some(sr.entity_count);
            key.total_relationships = Some(sr.relationship_count);
            key.property_fill_rate = Some(sr.overall_property_fill_rate);
        }
        if let Some(si) = &report.structural_integrity {
            key.graph_density = Some(si.graph_density);
            key.lcc_ratio = Some(si.largest_connected_component_ratio);
            key.singleton_ratio = Some(si.singleton_ratio);
        }
        if let Some(sq) = &report.semantic_quality {
            key.entity_normalization_score = Some(sq.entity_normalization_score);
            key.factual_precision = sq.factual_precision;
        }
        if let Some(eff) = &report.efficiency {
            key.knowledge_density = Some(eff.knowledge_density_per_chunk);
        }
        key
    }
}

/// Condensed view of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub key_metrics: KeyMetrics,
    pub composite: CompositeScore,
    pub recommendations: Vec<Recommendation>,
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

const MIN_FILL_RATE: f64 = 0.5;
const MIN_DIVERSITY: f64 = 1.0;
const MAX_SINGLETON_RATIO: f64 = 0.3;
const MIN_LCC_RATIO: f64 = 0.7;
const MIN_NORMALIZATION: f64 = 0.8;
const MIN_PRECISION: f64 = 0.8;
const MIN_PRODUCTIVE_RATIO: f64 = 0.7;

/// A suggested improvement to the extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ImproveMetadata,
    DiversifyRelationships,
    ImproveEntityLinking,
    ConnectFragments,
    NormalizeEntities,
    ReviewAccuracy,
    FilterSourceTexts,
    LooksGood,
}

impl Recommendation {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ImproveMetadata => {
                "Consider improving metadata extraction to increase property fill rate"
            }
            Self::DiversifyRelationships => "Work on identifying more diverse relationship types",
            Self::ImproveEntityLinking => {
                "High singleton ratio detected - consider improving entity linking"
            }
            Self::ConnectFragments => {
                "Graph appears fragmented - work on connecting related entities"
            }
            Self::NormalizeEntities => {
                "Entity normalization needs improvement - many potential aliases detected"
            }
            Self::ReviewAccuracy => {
                "Factual precision is low - review knowledge extraction accuracy"
            }
            Self::FilterSourceTexts => {
                "Many source texts are unproductive - improve text filtering or processing"
            }
            Self::LooksGood => "Overall performance looks good across evaluated dimensions",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Recommendations triggered by `report`; [`Recommendation::LooksGood`]
/// alone when none fire.
#[must_use]
pub fn recommendations(report: &EvaluationReport) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if let Some(sr) = &report.scale_richness {
        if sr.overall_property_fill_rate < MIN_FILL_RATE {
            out.push(Recommendation::ImproveMetadata);
        }
        if sr.relationship_diversity_score < MIN_DIVERSITY {
            out.push(Recommendation::DiversifyRelationships);
        }
    }

    if let Some(si) = &report.structural_integrity {
        if si.singleton_ratio > MAX_SINGLETON_RATIO {
            out.push(Recommendation::ImproveEntityLinking);
        }
        if si.largest_connected_component_ratio < MIN_LCC_RATIO {
            out.push(Recommendation::ConnectFragments);
        }
    }

    if let Some(sq) = &report.semantic_quality {
        if sq.entity_normalization_score < MIN_NORMALIZATION {
            out.push(Recommendation::NormalizeEntities);
        }
        if sq.factual_precision.is_some_and(|p| p < MIN_PRECISION) {
            out.push(Recommendation::ReviewAccuracy);
        }
    }

    if let Some(eff) = &report.efficiency {
        if eff.productive_source_ratio < MIN_PRODUCTIVE_RATIO {
            out.push(Recommendation::FilterSourceTexts);
        }
    }

    if out.is_empty() {
        out.push(Recommendation::LooksGood);
    }
    out
}
