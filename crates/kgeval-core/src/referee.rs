//! Referee capability used by the semantic-quality dimension.
//!
//! A referee judges a claim against supporting text. Network-backed
//! implementations (hosted LLMs, human review queues) live outside this
//! workspace; evaluation only needs the [`Referee`] trait.
//!
//! [`Verdict::from_response`] and the prompt builders give those
//! implementations a shared way to phrase requests and read free-text
//! answers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of judging one claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    PartiallyCorrect,
    Incorrect,
}

impl Verdict {
    /// Credit toward factual precision: 1, 0.5 or 0.
    #[must_use]
    pub const fn credit(self) -> f64 {
        match self {
            Self::Correct => 1.0,
            Self::PartiallyCorrect => 0.5,
            Self::Incorrect => 0.0,
        }
    }

    /// Read a verdict out of a free-text model response.
    ///
    /// "incorrect" is checked before "correct" because it contains it.
    /// Anything unrecognized is [`Verdict::Incorrect`].
    #[must_use]
    pub fn from_response(response: &str) -> Self {
        let text = response.trim().to_lowercase();
        if text.contains("incorrect") || text.contains("not correct") {
            Self::Incorrect
        } else if text.contains("partial") {
            Self::PartiallyCorrect
        } else if text.contains("correct") {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::PartiallyCorrect => "partially_correct",
            Self::Incorrect => "incorrect",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A judge of claims against evidence.
pub trait Referee: Send + Sync {
    /// Is `claim` supported by `evidence`?
    fn judge(&self, claim: &str, evidence: &str) -> Verdict;

    /// Is `item` a core fact of `evidence` rather than marginal detail?
    ///
    /// Defaults to treating fully supported items as core.
    fn is_core(&self, item: &str, evidence: &str) -> bool {
        self.judge(item, evidence) == Verdict::Correct
    }
}

impl<R: Referee + ?Sized> Referee for Box<R> {
    fn judge(&self, claim: &str, evidence: &str) -> Verdict {
        (**self).judge(claim, evidence)
    }

    fn is_core(&self, item: &str, evidence: &str) -> bool {
        (**self).is_core(item, evidence)
    }
}

/// Prompt asking whether `claim` is supported by `evidence`.
#[must_use]
pub fn factual_precision_prompt(claim: &str, evidence: &str) -> String {
    format!(
        "You are evaluating the factual accuracy of extracted knowledge from text.\n\n\
         Source Text:\n\"{evidence}\"\n\n\
         Extracted Relationship:\n{claim}\n\n\
         Question: Is this relationship factually correct according to the source text?\n\n\
         Please respond with exactly one of:\n\
         - \"CORRECT\" if the relationship is fully supported by the source text\n\
         - \"PARTIALLY_CORRECT\" if the relationship is somewhat supported but has inaccuracies\n\
         - \"INCORRECT\" if the relationship is not supported or contradicted by the source text\n\n\
         Response:"
    )
}

/// Prompt asking whether `item` is a core fact of `evidence`.
#[must_use]
pub fn contextual_relevance_prompt(item: &str, evidence: &str) -> String {
    format!(
        "You are evaluating the importance of extracted knowledge from text.\n\n\
         Source Text:\n\"{evidence}\"\n\n\
         Extracted Knowledge:\n{item}\n\n\
         Question: Is this extracted knowledge a CORE FACT or MARGINAL information from the source text?\n\
         Core facts are central, important information that represents the main content or key details.\n\
         Marginal information is peripheral, trivial, or secondary details.\n\n\
         Please respond with exactly one of:\n\
         - \"CORE\" if this is important, central information\n\
         - \"MARGINAL\" if this is peripheral or trivial information\n\n\
         Response:"
    )
}

/// Read a core/marginal answer out of a free-text model response.
///
/// Any mention of "marginal" wins, so "MARGINAL, not important" is not core.
#[must_use]
pub fn is_core_response(response: &str) -> bool {
    let text = response.trim().to_lowercase();
    !text.contains("marginal") && (text.contains("core") || text.contains("important"))
}
