// Text normalization and near-duplicate detection.
//
// Bot content tends to be templated: the same comment pasted across
// threads with minor edits. Normalization strips the noise (case, URLs,
// punctuation) so the pairwise similarity check sees through it.

use std::sync::LazyLock;

use regex_lite::Regex;
use strsim::normalized_levenshtein;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+|www\S+").unwrap());
static NON_ALNUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize text for comparison: lowercase, strip URL-like tokens,
/// keep only ASCII alphanumerics and spaces, collapse whitespace.
///
/// Pure and total; empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_urls = URL_RE.replace_all(&lowered, "");
    let alnum = NON_ALNUM_RE.replace_all(&no_urls, "");
    WHITESPACE_RE.replace_all(&alnum, " ").trim().to_string()
}

/// Fraction of text pairs whose normalized similarity exceeds `threshold`.
///
/// Entries that normalize to empty are dropped first. Fewer than 3
/// surviving texts is insufficient evidence and returns 0.0. Quadratic
/// in the number of texts, so callers cap the input at the per-account
/// fetch limit.
pub fn duplicate_ratio(texts: &[&str], threshold: f64) -> f64 {
    let cleaned: Vec<String> = texts
        .iter()
        .map(|t| normalize(t))
        .filter(|t| !t.is_empty())
        .collect();

    if cleaned.len() < 3 {
        return 0.0;
    }

    let mut duplicate_pairs = 0u32;
    let mut total_pairs = 0u32;
    for i in 0..cleaned.len() {
        for j in (i + 1)..cleaned.len() {
            total_pairs += 1;
            if normalized_levenshtein(&cleaned[i], &cleaned[j]) > threshold {
                duplicate_pairs += 1;
            }
        }
    }

    duplicate_pairs as f64 / total_pairs as f64
}
