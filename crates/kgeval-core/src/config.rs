use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::KgError;

/// Options recognized by the evaluator.
///
/// Every field has a default, so an empty TOML document (or no file at all)
/// yields a usable configuration. The referee is not part of this struct;
/// it is passed to the evaluator alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Maximum number of items judged per referee-backed metric.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    /// Minimum name similarity for two entities to count as an alias pair.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    /// Seed for the sampling RNG. Fixed so repeated runs agree.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub pagerank: PageRankConfig,
    #[serde(default)]
    pub weights: CompositeWeights,
    /// Dimensions to evaluate, in report order.
    #[serde(default = "Dimension::all")]
    pub dimensions: Vec<Dimension>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            similarity_threshold: default_similarity_threshold(),
            seed: default_seed(),
            pagerank: PageRankConfig::default(),
            weights: CompositeWeights::default(),
            dimensions: Dimension::all(),
        }
    }
}

impl EvalConfig {
    /// Parse a configuration from TOML text and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`KgError::Config`] on a syntax error and
    /// [`KgError::InvalidConfig`] when a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self, KgError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`KgError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), KgError> {
        if self.sample_size == 0 {
            return Err(invalid("sample_size", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(invalid(
                "similarity_threshold",
                format!("{} is outside [0, 1]", self.similarity_threshold),
            ));
        }
        let damping = self.pagerank.damping;
        if !(damping > 0.0 && damping < 1.0) {
            return Err(invalid(
                "pagerank.damping",
                format!("{damping} is outside (0, 1)"),
            ));
        }
        if !(self.pagerank.tolerance.is_finite() && self.pagerank.tolerance > 0.0) {
            return Err(invalid("pagerank.tolerance", "must be a positive number"));
        }
        if !self.weights.is_valid() {
            return Err(invalid(
                "weights",
                "weights must be finite, non-negative, and not all zero",
            ));
        }
        Ok(())
    }

    /// Whether `dimension` is enabled.
    #[must_use]
    pub fn includes(&self, dimension: Dimension) -> bool {
        self.dimensions.contains(&dimension)
    }
}

/// Load an [`EvalConfig`] from a TOML file.
///
/// A missing file yields [`EvalConfig::default`].
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed or
/// validated.
pub fn load_config(path: &Path) -> Result<EvalConfig> {
    if !path.exists() {
        return Ok(EvalConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    EvalConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// PageRank power-iteration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Probability of following a link rather than teleporting.
    /// Default: 0.85.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Per-node convergence threshold: stop when the L1 change is below
    /// `node_count * tolerance`. Default: 1e-6.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Maximum number of iterations. Default: 100.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

/// Weights for combining dimension scores into one number.
///
/// `score = Σ w_d * s_d / Σ w_d` over the dimensions present in a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeWeights {
    #[serde(default = "default_weight")]
    pub richness: f64,
    #[serde(default = "default_weight")]
    pub structure: f64,
    #[serde(default = "default_weight")]
    pub semantic: f64,
    #[serde(default = "default_weight")]
    pub efficiency: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            richness: default_weight(),
            structure: default_weight(),
            semantic: default_weight(),
            efficiency: default_weight(),
        }
    }
}

impl CompositeWeights {
    /// Weight for a single dimension.
    #[must_use]
    pub const fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::ScaleRichness => self.richness,
            Dimension::StructuralIntegrity => self.structure,
            Dimension::SemanticQuality => self.semantic,
            Dimension::Efficiency => self.efficiency,
        }
    }

    fn is_valid(&self) -> bool {
        let all = [self.richness, self.structure, self.semantic, self.efficiency];
        all.iter().all(|w| w.is_finite() && *w >= 0.0) && all.iter().any(|w| *w > 0.0)
    }
}

/// The four evaluation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    ScaleRichness,
    StructuralIntegrity,
    SemanticQuality,
    Efficiency,
}

impl Dimension {
    /// All dimensions in canonical order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![
            Self::ScaleRichness,
            Self::StructuralIntegrity,
            Self::SemanticQuality,
            Self::Efficiency,
        ]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScaleRichness => "scale_richness",
            Self::StructuralIntegrity => "structural_integrity",
            Self::SemanticQuality => "semantic_quality",
            Self::Efficiency => "efficiency",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> KgError {
    KgError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

const fn default_sample_size() -> usize {
    50
}

const fn default_similarity_threshold() -> f64 {
    0.7
}

const fn default_seed() -> u64 {
    0x6b67_6576_616c
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    100
}

const fn default_weight() -> f64 {
    0.25
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EvalConfig::from_toml_str("").expect("parse empty");
        assert_eq!(config, EvalConfig::default());
        assert_eq!(config.sample_size, 50);
        assert!((config.similarity_threshold - 0.7).abs() < f64::EPSILON);
        assert!((config.pagerank.damping - 0.85).abs() < f64::EPSILON);
        assert_eq!(config.pagerank.max_iter, 100);
        assert_eq!(config.dimensions.len(), 4);
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let config = EvalConfig::from_toml_str(
            r#"
            sample_size = 10
            dimensions = ["structural_integrity", "efficiency"]

            [pagerank]
            max_iter = 20

            [weights]
            structure = 0.5
            "#,
        )
        .expect("parse");

        assert_eq!(config.sample_size, 10);
        assert_eq!(config.pagerank.max_iter, 20);
        assert!((config.pagerank.damping - 0.85).abs() < f64::EPSILON);
        assert!((config.weights.structure - 0.5).abs() < f64::EPSILON);
        assert!((config.weights.richness - 0.25).abs() < f64::EPSILON);
        assert!(config.includes(Dimension::StructuralIntegrity));
        assert!(!config.includes(Dimension::SemanticQuality));
    }

    #[test]
    fn syntax_error_is_config_error() {
        let err = EvalConfig::from_toml_str("sample_size = [").expect_err("bad toml");
        assert!(matches!(err, KgError::Config(_)));
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let err = EvalConfig::from_toml_str("similarity_threshold = 1.5").expect_err("range");
        assert!(matches!(
            err,
            KgError::InvalidConfig {
                field: "similarity_threshold",
                ..
            }
        ));
    }

    #[test]
    fn zero_sample_size_rejected() {
        let config = EvalConfig {
            sample_size: 0,
            ..EvalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn damping_must_be_open_interval() {
        let mut config = EvalConfig::default();
        config.pagerank.damping = 1.0;
        assert!(config.validate().is_err());
        config.pagerank.damping = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn all_zero_weights_rejected() {
        let config = EvalConfig {
            weights: CompositeWeights {
                richness: 0.0,
                structure: 0.0,
                semantic: 0.0,
                efficiency: 0.0,
            },
            ..EvalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_missing_file_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(&dir.path().join("kgeval.toml")).expect("load");
        assert_eq!(config, EvalConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kgeval.toml");
        std::fs::write(&path, "seed = 7\n").expect("write");
        let config = load_config(&path).expect("load");
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn load_config_reports_path_on_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kgeval.toml");
        std::fs::write(&path, "similarity_threshold = -1.0\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(format!("{err:#}").contains("kgeval.toml"));
    }

    #[test]
    fn dimension_names_round_trip_through_display() {
        for d in Dimension::all() {
            let json = serde_json::to_string(&d).expect("serialize");
            assert_eq!(json, format!("\"{d}\""));
        }
    }
}
