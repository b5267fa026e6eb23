use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for conditions raised or tolerated while
/// loading and evaluating a knowledge graph.
///
/// Only the `E1xxx` codes surface as [`KgError`]s. The rest tag conditions
/// that evaluation absorbs with a documented default, so logs and
/// diagnostics can still name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InputReadFailed,
    InputParseError,
    ConfigParseError,
    InvalidConfig,
    DanglingReference,
    DuplicateEntity,
    DegenerateGraph,
    PageRankFallback,
    RefereeUnavailable,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InputReadFailed => "E1001",
            Self::InputParseError => "E1002",
            Self::ConfigParseError => "E1003",
            Self::InvalidConfig => "E1004",
            Self::DanglingReference => "E2001",
            Self::DuplicateEntity => "E2002",
            Self::DegenerateGraph => "E2003",
            Self::PageRankFallback => "E3001",
            Self::RefereeUnavailable => "E4001",
        }
    }

    /// Short human-facing summary for logs.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InputReadFailed => "Knowledge graph file could not be read",
            Self::InputParseError => "Knowledge graph JSON parse error",
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidConfig => "Config value out of range",
            Self::DanglingReference => "Relationship references an unknown entity",
            Self::DuplicateEntity => "Entity name appears more than once",
            Self::DegenerateGraph => "Graph has no entities or no relationships",
            Self::PageRankFallback => "PageRank did not converge",
            Self::RefereeUnavailable => "No referee configured",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InputReadFailed => Some("Check the path and read permissions."),
            Self::InputParseError => Some(
                "Provide top-level `entities`, `relationships` and `source_texts` arrays.",
            ),
            Self::ConfigParseError => Some("Fix the TOML syntax in the config file and retry."),
            Self::InvalidConfig => {
                Some("Keep similarity_threshold in [0, 1] and damping in (0, 1).")
            }
            Self::DanglingReference => {
                Some("Emit an entity record for every relationship endpoint.")
            }
            Self::DuplicateEntity => Some("Merge entity records that share a name."),
            Self::DegenerateGraph => None,
            Self::PageRankFallback => Some("Raise pagerank.max_iter or loosen the tolerance."),
            Self::RefereeUnavailable => {
                Some("Pass a referee to enable factual precision and relevance.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors returned while loading a knowledge graph or its configuration.
#[derive(Debug, thiserror::Error)]
pub enum KgError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid knowledge graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config TOML: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl KgError {
    /// The stable [`ErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::InputReadFailed,
            Self::Json(_) => ErrorCode::InputParseError,
            Self::Config(_) => ErrorCode::ConfigParseError,
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
        }
    }
}
