//! Extraction efficiency: knowledge produced per unit of source text.
//!
//! Text length is measured in characters. Without source texts every value
//! is zero.

use kgeval_core::{KnowledgeGraph, SourceText};
use kgeval_graph::metrics::distribution::round_to;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Efficiency of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyMetrics {
    /// `(entities + relationships) / source texts`.
    pub knowledge_density_per_chunk: f64,
    pub total_knowledge_items: usize,
    pub total_source_chunks: usize,
    /// Entities per 1000 characters of source text.
    pub entities_per_1000_chars: f64,
    /// Relationships per 1000 characters of source text.
    pub relationships_per_1000_chars: f64,
    pub average_entities_per_source: f64,
    pub average_relationships_per_source: f64,
    pub average_source_text_length: f64,
    pub total_text_length: usize,
    /// Share of source texts that link at least one entity or edge.
    pub productive_source_ratio: f64,
    pub productive_sources: usize,
    pub unproductive_sources: usize,
}

/// Compute [`EfficiencyMetrics`] for `kg`.
#[must_use]
#[instrument(skip(kg))]
#[allow(clippy::cast_precision_loss)]
pub fn evaluate_efficiency(kg: &KnowledgeGraph) -> EfficiencyMetrics {
    let chunks = kg.source_texts.len();
    if chunks == 0 {
        return EfficiencyMetrics::default();
    }

    let entities = kg.entities.len();
    let relationships = kg.relationships.len();
    let items = entities + relationships;
    let total_chars: usize = kg.source_texts.iter().map(SourceText::char_len).sum();
    let productive = kg.source_texts.iter().filter(|t| t.is_productive()).count();

    let per_thousand = |count: usize| {
        if total_chars == 0 {
            0.0
        } else {
            count as f64 * 1000.0 / total_chars as f64
        }
    };
    let n = chunks as f64;

    EfficiencyMetrics {
        knowledge_density_per_chunk: round_to(items as f64 / n, 4),
        total_knowledge_items: items,
        total_source_chunks: chunks,
        entities_per_1000_chars: round_to(per_thousand(entities), 6),
        relationships_per_1000_chars: round_to(per_thousand(relationships), 6),
        average_entities_per_source: round_to(entities as f64 / n, 4),
        average_relationships_per_source: round_to(relationships as f64 / n, 4),
        average_source_text_length: round_to(total_chars as f64 / n, 2),
        total_text_length: total_chars,
        productive_source_ratio: round_to(productive as f64 / n, 4),
        productive_sources: productive,
        unproductive_sources: chunks - productive,
    }
}
