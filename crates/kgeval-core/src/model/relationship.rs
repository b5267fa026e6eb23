use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A directed, described edge between two entities.
///
/// Identity is `(source_name, target_name, description)`. Keywords and
/// weight are metadata and do not participate in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "source_entity_name", alias = "source_name")]
    pub source_name: String,
    #[serde(rename = "target_entity_name", alias = "target_name")]
    pub target_name: String,
    pub description: String,
    /// Tags summarizing the relationship type, in extraction order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Confidence or importance. Treated as 1.0 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Relationship {
    #[must_use]
    pub fn new(
        source_name: impl Into<String>,
        target_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            target_name: target_name.into(),
            description: description.into(),
            keywords: None,
            weight: None,
        }
    }

    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// The `(source, target)` endpoint pair.
    #[must_use]
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.source_name, &self.target_name)
    }

    /// Number of optional attributes that carry a value (0..=2).
    ///
    /// An empty keyword list counts as missing.
    #[must_use]
    pub fn filled_properties(&self) -> usize {
        let has_keywords = self.keywords.as_ref().is_some_and(|k| !k.is_empty());
        usize::from(has_keywords) + usize::from(self.weight.is_some())
    }

    /// Claim text handed to a referee: `"source -> target: description"`.
    #[must_use]
    pub fn claim(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Relationship {
    fn eq(&self, other: &Self) -> bool {
        self.source_name == other.source_name
            && self.target_name == other.target_name
            && self.description == other.description
    }
}

impl Eq for Relationship {}

impl Hash for Relationship {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source_name.hash(state);
        self.target_name.hash(state);
        self.description.hash(state);
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {}",
            self.source_name, self.target_name, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_metadata() {
        let a = Relationship::new("A", "B", "knows").with_weight(0.2);
        let b = Relationship::new("A", "B", "knows").with_keywords(["social"]);
        assert_eq!(a, b);
        assert_ne!(a, Relationship::new("B", "A", "knows"));
    }

    #[test]
    fn empty_keywords_are_not_filled() {
        let r = Relationship::new("A", "B", "x").with_keywords(Vec::<String>::new());
        assert_eq!(r.filled_properties(), 0);
        let r = r.with_weight(1.0);
        assert_eq!(r.filled_properties(), 1);
    }

    #[test]
    fn claim_format() {
        let r = Relationship::new("Marie Curie", "Radium", "discovered");
        assert_eq!(r.claim(), "Marie Curie -> Radium: discovered");
    }

    #[test]
    fn deserializes_prefixed_field_names() {
        let r: Relationship = serde_json::from_str(
            r#"{
                "source_entity_name": "A",
                "target_entity_name": "B",
                "description": "links",
                "keywords": ["k1", "k2"],
                "weight": 0.5
            }"#,
        )
        .expect("parse relationship");
        assert_eq!(r.endpoints(), ("A", "B"));
        assert_eq!(r.keywords.as_deref().map(<[String]>::len), Some(2));
        assert_eq!(r.weight, Some(0.5));
    }

    #[test]
    fn deserializes_short_aliases() {
        let r: Relationship = serde_json::from_str(
            r#"{"source_name": "A", "target_name": "B", "description": "links"}"#,
        )
        .expect("parse relationship");
        assert_eq!(r.endpoints(), ("A", "B"));
        assert!(r.keywords.is_none());
        assert!(r.weight.is_none());
    }
}
