//! Edit-distance name similarity for alias detection.

/// Levenshtein distance between `a` and `b`, counted in chars.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single rolling row over `b`.
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Similarity of two entity names in `[0, 1]`.
///
/// Names are lowercased and trimmed, then scored as
/// `1 - distance / max_len`. An empty name scores 0.0 against anything;
/// names equal after normalization score 1.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn name_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein(&a, &b);
    (1.0 - distance as f64 / max_len as f64).max(0.0)
}
