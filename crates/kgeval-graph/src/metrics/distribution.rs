//! Entropy and summary statistics of a score distribution.

use serde::{Deserialize, Serialize};

/// Shannon entropy (base 2) of `values` treated as unnormalized weights.
///
/// Values are divided by their total; zero entries are skipped. Returns 0.0
/// for an empty slice or one whose total is not positive.
///
/// One dominant node gives an entropy near 0; `N` equal values give
/// `log2(N)`.
#[must_use]
pub fn shannon_entropy(values: &[f64]) -> f64 {
    let total: f64 = values.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    if total <= 0.0 || !total.is_finite() {
        return 0.0;
    }

    let entropy: f64 = values
        .iter()
        .filter(|v| v.is_finite() && **v > 0.0)
        .map(|v| {
            let p = v / total;
            -p * p.log2()
        })
        .sum();

    // Guard against -0.0 for a single-mass distribution.
    entropy.max(0.0)
}

/// Mean, population standard deviation, max and min of a distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub std: f64,
    pub max: f64,
    pub min: f64,
}

impl SummaryStats {
    /// Summarize `values`; all zeros for an empty slice.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);

        Self {
            mean,
            std: variance.sqrt(),
            max,
            min,
        }
    }

    /// Round every field to `places` decimal places.
    #[must_use]
    pub fn rounded(self, places: i32) -> Self {
        Self {
            mean: round_to(self.mean, places),
            std: round_to(self.std, places),
            max: round_to(self.max, places),
            min: round_to(self.min, places),
        }
    }
}

/// Round `value` to `places` decimal places (half away from zero).
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
