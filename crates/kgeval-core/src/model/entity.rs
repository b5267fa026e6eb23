use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A node in the knowledge graph.
///
/// Identity is the name alone: two records with the same name are the same
/// entity even if their type or description differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique, canonical, human-readable name.
    #[serde(rename = "entity_name", alias = "name")]
    pub name: String,
    /// Category such as `Person` or `Location`.
    #[serde(
        rename = "entity_type",
        alias = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entity {
    /// An entity with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_type: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Number of optional attributes that carry a value (0..=2).
    #[must_use]
    pub fn filled_properties(&self) -> usize {
        usize::from(self.entity_type.is_some()) + usize::from(self.description.is_some())
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
