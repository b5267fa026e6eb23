//! Semantic quality: alias fragmentation and referee-judged faithfulness.
//!
//! # Metrics
//!
//! - **Entity normalization**: pairs of entity names whose
//!   [`name_similarity`] reaches the configured threshold are likely
//!   aliases of one real-world entity. The score is
//!   `max(0, 1 - pairs / entities)`.
//! - **Factual precision**: a seeded sample of relationships is judged
//!   against the source text that links them. Partial verdicts earn half
//!   credit.
//! - **Contextual relevance**: a seeded sample of (entity or relationship,
//!   source text) items is checked with [`Referee::is_core`].
//!
//! The two referee-backed metrics are `None` when no referee is supplied.

use kgeval_core::{ErrorCode, KnowledgeGraph, Referee, Relationship, SourceText, Verdict};
use kgeval_graph::metrics::distribution::round_to;
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::similarity::name_similarity;

/// Number of pairs listed in [`SemanticMetrics::potential_alias_pairs`].
pub const TOP_ALIAS_COUNT: usize = 10;

const NO_REFEREE: &str = "referee not provided";
const NO_SAMPLE: &str = "sample size is zero";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Two entity names that probably denote the same thing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasPair {
    pub first: String,
    pub second: String,
    pub similarity: f64,
}

/// Verdict tallies behind [`SemanticMetrics::factual_precision`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecisionDetails {
    pub total_evaluated: usize,
    pub correct: usize,
    pub partially_correct: usize,
    pub incorrect: usize,
    /// Why nothing was evaluated, when that is the case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Tallies behind [`SemanticMetrics::contextual_relevance`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceDetails {
    pub total_evaluated: usize,
    pub core_facts: usize,
    pub marginal_facts: usize,
    /// Why nothing was evaluated, when that is the case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Semantic quality of one knowledge graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticMetrics {
    pub entity_normalization_score: f64,
    /// Most similar pairs first.
    pub potential_alias_pairs: Vec<AliasPair>,
    pub alias_pairs_count: usize,
    pub factual_precision: Option<f64>,
    pub factual_precision_details: PrecisionDetails,
    pub contextual_relevance: Option<f64>,
    pub contextual_relevance_details: RelevanceDetails,
}

// ---------------------------------------------------------------------------
// Dimension entry point
// ---------------------------------------------------------------------------

/// Compute [`SemanticMetrics`] for `kg`.
///
/// `rng` drives sampling for both referee-backed metrics, precision first.
#[instrument(skip_all, fields(entities = kg.entities.len(), referee = referee.is_some()))]
pub fn evaluate_semantic<R: Rng + ?Sized>(
    kg: &KnowledgeGraph,
    referee: Option<&dyn Referee>,
    similarity_threshold: f64,
    sample_size: usize,
    rng: &mut R,
) -> SemanticMetrics {
    let aliases = find_aliases(kg, similarity_threshold);
    let normalization = normalization_score(aliases.len(), kg.entities.len());

    let skipped = |note: &str| {
        (
            None::<f64>,
            PrecisionDetails {
                note: Some(note.to_string()),
                ..PrecisionDetails::default()
            },
            None::<f64>,
            RelevanceDetails {
                note: Some(note.to_string()),
                ..RelevanceDetails::default()
            },
        )
    };

    let (factual_precision, factual_precision_details, contextual_relevance, contextual_relevance_details) =
        match referee {
            Some(_) if sample_size == 0 => {
                warn!(code = %ErrorCode::InvalidConfig, "sample_size is 0; skipping referee-backed metrics");
                skipped(NO_SAMPLE)
            }
            Some(referee) => {
                let (precision, precision_details) = factual_precision(kg, referee, sample_size, rng);
                let (relevance, relevance_details) = contextual_relevance(kg, referee, sample_size, rng);
                (Some(precision), precision_details, Some(relevance), relevance_details)
            }
            None => {
                debug!(code = %ErrorCode::RefereeUnavailable, "skipping referee-backed metrics");
                skipped(NO_REFEREE)
            }
        };

    SemanticMetrics {
        entity_normalization_score: round_to(normalization, 4),
        alias_pairs_count: aliases.len(),
        potential_alias_pairs: aliases.into_iter().take(TOP_ALIAS_COUNT).collect(),
        factual_precision,
        factual_precision_details,
        contextual_relevance,
        contextual_relevance_details,
    }
}

// ---------------------------------------------------------------------------
// Entity normalization
// ---------------------------------------------------------------------------

/// Every entity-name pair at or above `threshold`, most similar first.
///
/// Equal similarities keep input order.
#[must_use]
pub fn find_aliases(kg: &KnowledgeGraph, threshold: f64) -> Vec<AliasPair> {
    let names = kg.entity_names();
    let mut pairs = Vec::new();

    for (i, first) in names.iter().enumerate() {
        for second in &names[i + 1..] {
            let similarity = name_similarity(first, second);
            if similarity >= threshold {
                pairs.push(AliasPair {
                    first: (*first).to_string(),
                    second: (*second).to_string(),
                    similarity: round_to(similarity, 4),
                });
            }
        }
    }

    pairs.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    pairs
}

#[allow(clippy::cast_precision_loss)]
fn normalization_score(pair_count: usize, entity_count: usize) -> f64 {
    if entity_count <= 1 {
        return 1.0;
    }
    (1.0 - pair_count as f64 / entity_count as f64).max(0.0)
}

// ---------------------------------------------------------------------------
// Factual precision
// ---------------------------------------------------------------------------

/// Relationships paired with the first source text linking their endpoints.
///
/// When several texts link the same (source, target) pair, the earliest text
/// in `kg.source_texts` wins. Every relationship with that pair is mapped.
#[must_use]
pub fn map_relationships_to_sources(kg: &KnowledgeGraph) -> Vec<(&Relationship, &SourceText)> {
    kg.relationships
        .iter()
        .filter_map(|rel| {
            kg.source_texts
                .iter()
                .find(|text| text.links_edge(&rel.source_name, &rel.target_name))
                .map(|text| (rel, text))
        })
        .collect()
}

/// Judge a sample of mapped relationships and return the precision.
#[allow(clippy::cast_precision_loss)]
pub fn factual_precision<R: Rng + ?Sized>(
    kg: &KnowledgeGraph,
    referee: &dyn Referee,
    sample_size: usize,
    rng: &mut R,
) -> (f64, PrecisionDetails) {
    if kg.relationships.is_empty() || kg.source_texts.is_empty() {
        return (0.0, PrecisionDetails::default());
    }

    let mapped = map_relationships_to_sources(kg);
    if mapped.is_empty() {
        return (
            0.0,
            PrecisionDetails {
                note: Some("no relationships could be mapped to source texts".to_string()),
                ..PrecisionDetails::default()
            },
        );
    }

    let mut details = PrecisionDetails::default();
    for (rel, text) in mapped.choose_multiple(rng, sample_size.min(mapped.len())) {
        match referee.judge(&rel.claim(), &text.content) {
            Verdict::Correct => details.correct += 1,
            Verdict::PartiallyCorrect => details.partially_correct += 1,
            Verdict::Incorrect => details.incorrect += 1,
        }
        details.total_evaluated += 1;
    }

    if details.total_evaluated == 0 {
        details.note = Some(NO_SAMPLE.to_string());
        return (0.0, details);
    }

    let credit = Verdict::PartiallyCorrect
        .credit()
        .mul_add(details.partially_correct as f64, details.correct as f64);
    let precision = credit / details.total_evaluated as f64;

    info!(
        evaluated = details.total_evaluated,
        correct = details.correct,
        partial = details.partially_correct,
        "factual precision judged"
    );
    (round_to(precision, 4), details)
}

// ---------------------------------------------------------------------------
// Contextual relevance
// ---------------------------------------------------------------------------

/// Text handed to the referee for one knowledge item.
fn describe_entity(kg: &KnowledgeGraph, name: &str) -> String {
    match kg.entity(name).and_then(|e| e.entity_type.as_deref()) {
        Some(kind) => format!("Entity: {name} (Type: {kind})"),
        None => format!("Entity: {name}"),
    }
}

fn describe_relationship(rel: &Relationship) -> String {
    format!("Relationship: {}", rel.claim())
}

/// Check a sample of knowledge items for core relevance.
#[allow(clippy::cast_precision_loss)]
pub fn contextual_relevance<R: Rng + ?Sized>(
    kg: &KnowledgeGraph,
    referee: &dyn Referee,
    sample_size: usize,
    rng: &mut R,
) -> (f64, RelevanceDetails) {
    if kg.source_texts.is_empty() {
        return (0.0, RelevanceDetails::default());
    }

    let mut items: Vec<(String, &SourceText)> = Vec::new();
    for entity in &kg.entities {
        for text in kg.source_texts.iter().filter(|t| t.links_entity(&entity.name)) {
            items.push((describe_entity(kg, &entity.name), text));
        }
    }
    for (rel, text) in map_relationships_to_sources(kg) {
        items.push((describe_relationship(rel), text));
    }

    if items.is_empty() {
        return (
            0.0,
            RelevanceDetails {
                note: Some("no knowledge items could be mapped to source texts".to_string()),
                ..RelevanceDetails::default()
            },
        );
    }

    let mut details = RelevanceDetails::default();
    for (item, text) in items.choose_multiple(rng, sample_size.min(items.len())) {
        if referee.is_core(item, &text.content) {
            details.core_facts += 1;
        } else {
            details.marginal_facts += 1;
        }
        details.total_evaluated += 1;
    }

    if details.total_evaluated == 0 {
        details.note = Some(NO_SAMPLE.to_string());
        return (0.0, details);
    }

    let relevance = details.core_facts as f64 / details.total_evaluated as f64;
    info!(
        evaluated = details.total_evaluated,
        core = details.core_facts,
        "contextual relevance judged"
    );
    (round_to(relevance, 4), details)
}
