//! Scale and richness: how much was extracted and how complete it is.
//!
//! # Metrics
//!
//! - **Counts** of entities, relationships and source texts.
//! - **Property fill rate**: the share of optional attributes that carry a
//!   value. Entities have two (type, description), relationships have two
//!   (non-empty keywords, weight). The overall rate weights each kind by its
//!   record count.
//! - **Relational diversity**: relationship "types" are the lowercased,
//!   trimmed keywords of each relationship. A relationship without keywords
//!   contributes the first two words of its description instead. Diversity
//!   is the base-2 Shannon entropy of the type counts.

use std::collections::HashMap;

use kgeval_core::{Entity, KnowledgeGraph, Relationship};
use kgeval_graph::metrics::distribution::{round_to, shannon_entropy};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of types listed in [`RichnessMetrics::relationship_type_distribution`].
pub const TOP_TYPE_COUNT: usize = 10;

/// A relationship type and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    pub relationship_type: String,
    pub count: usize,
}

/// Scale and richness of one knowledge graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichnessMetrics {
    pub entity_count: usize,
    pub relationship_count: usize,
    pub source_text_count: usize,
    pub entity_property_fill_rate: f64,
    pub relationship_property_fill_rate: f64,
    pub overall_property_fill_rate: f64,
    pub unique_relationship_types: usize,
    /// Most frequent types, count descending then first-seen order.
    pub relationship_type_distribution: Vec<TypeCount>,
    /// Base-2 entropy of the type distribution.
    pub relationship_diversity_score: f64,
}

/// Compute [`RichnessMetrics`] for `kg`.
#[must_use]
#[instrument(skip(kg))]
pub fn evaluate_richness(kg: &KnowledgeGraph) -> RichnessMetrics {
    let fill = FillRates::of(kg);
    let types = relationship_types(kg);
    let counts: Vec<f64> = types.iter().map(|t| count_as_f64(t.count)).collect();

    RichnessMetrics {
        entity_count: kg.entities.len(),
        relationship_count: kg.relationships.len(),
        source_text_count: kg.source_texts.len(),
        entity_property_fill_rate: round_to(fill.entity, 4),
        relationship_property_fill_rate: round_to(fill.relationship, 4),
        overall_property_fill_rate: round_to(fill.overall, 4),
        unique_relationship_types: types.len(),
        relationship_diversity_score: round_to(shannon_entropy(&counts), 4),
        relationship_type_distribution: types.into_iter().take(TOP_TYPE_COUNT).collect(),
    }
}

// ---------------------------------------------------------------------------
// Property fill rate
// ---------------------------------------------------------------------------

struct FillRates {
    entity: f64,
    relationship: f64,
    overall: f64,
}

impl FillRates {
    fn of(kg: &KnowledgeGraph) -> Self {
        let entity_filled: usize = kg.entities.iter().map(Entity::filled_properties).sum();
        let rel_filled: usize = kg
            .relationships
            .iter()
            .map(Relationship::filled_properties)
            .sum();

        let entity_slots = kg.entities.len() * 2;
        let rel_slots = kg.relationships.len() * 2;

        Self {
            entity: ratio(entity_filled, entity_slots),
            relationship: ratio(rel_filled, rel_slots),
            overall: ratio(entity_filled + rel_filled, entity_slots + rel_slots),
        }
    }
}

// ---------------------------------------------------------------------------
// Relational diversity
// ---------------------------------------------------------------------------

/// Every relationship type with its count, most frequent first.
fn relationship_types(kg: &KnowledgeGraph) -> Vec<TypeCount> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    let mut record = |label: String| {
        let count = counts.entry(label.clone()).or_insert(0);
        if *count == 0 {
            order.push(label);
        }
        *count += 1;
    };

    for rel in &kg.relationships {
        match rel.keywords.as_deref() {
            Some(keywords) if !keywords.is_empty() => {
                for keyword in keywords {
                    record(keyword.trim().to_lowercase());
                }
            }
            _ => {
                let description = rel.description.to_lowercase();
                let label = description.split_whitespace().take(2).collect::<Vec<_>>().join(" ");
                record(label);
            }
        }
    }

    let mut types: Vec<TypeCount> = order
        .into_iter()
        .map(|label| TypeCount {
            count: counts.get(&label).copied().unwrap_or(0),
            relationship_type: label,
        })
        .collect();
    // Stable: equal counts stay in first-seen order.
    types.sort_by(|a, b| b.count.cmp(&a.count));
    types
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[allow(clippy::cast_precision_loss)]
const fn count_as_f64(count: usize) -> f64 {
    count as f64
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}
