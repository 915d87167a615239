//! Similarity scorer — TF-IDF cosine similarity between two documents, as a percentage.
//!
//! Vectorizer configuration:
//! - tokens are runs of two or more word characters, lowercased
//! - English stop words removed (`VECTORIZER_STOP_WORDS`)
//! - raw term counts weighted by smoothed idf: `ln((1 + n) / (1 + df)) + 1`
//!
//! The vocabulary is rebuilt from the two-document corpus on every call.

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::analysis::stop_words::VECTORIZER_STOP_WORDS;

/// Absorbs floating-point error so that identical documents score exactly 100.
const PERCENT_TOLERANCE: f64 = 1e-9;

fn term_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("term pattern is valid"))
}

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| VECTORIZER_STOP_WORDS.iter().copied().collect())
}

/// Term counts of one document over the vectorizer's analyzer.
fn term_counts(text: &str) -> BTreeMap<String, f64> {
    let lowered = text.to_lowercase();
    let mut counts = BTreeMap::new();
    for m in term_pattern().find_iter(&lowered) {
        let term = m.as_str();
        if stop_words().contains(term) {
            continue;
        }
        *counts.entry(term.to_string()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine similarity of the TF-IDF vectors of `a` and `b`, in `[0, 1]`.
///
/// Returns 0.0 when either document is blank or the shared vocabulary is empty.
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }

    let counts_a = term_counts(a);
    let counts_b = term_counts(b);
    if counts_a.is_empty() && counts_b.is_empty() {
        return 0.0;
    }

    // Sorted vocabulary: iteration order does not depend on argument order.
    let vocabulary: BTreeMap<&str, f64> = counts_a
        .keys()
        .chain(counts_b.keys())
        .map(|term| {
            let df = counts_a.contains_key(term) as u8 + counts_b.contains_key(term) as u8;
            (term.as_str(), idf(2, df as usize))
        })
        .collect();

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (term, idf) in &vocabulary {
        let wa = counts_a.get(*term).copied().unwrap_or(0.0) * idf;
        let wb = counts_b.get(*term).copied().unwrap_or(0.0) * idf;
        dot += wa * wb;
        norm_a += wa * wa;
        norm_b += wb * wb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}

/// Smoothed inverse document frequency.
fn idf(doc_count: usize, doc_frequency: usize) -> f64 {
    ((1.0 + doc_count as f64) / (1.0 + doc_frequency as f64)).ln() + 1.0
}

/// Match score between two documents: `floor(cosine * 100)`, in `[0, 100]`.
pub fn score(a: &str, b: &str) -> u32 {
    let percent = (cosine_similarity(a, b) * 100.0 + PERCENT_TOLERANCE).floor();
    percent.clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "We need a Python developer with AWS and Docker experience. \
                      Experience with Python and AWS required.";
    const RESUME: &str = "Built scalable APIs using Python and deployed via Docker.";

    #[test]
    fn test_empty_documents_score_zero() {
        assert_eq!(score("", JD), 0);
        assert_eq!(score(JD, ""), 0);
        assert_eq!(score("", ""), 0);
        assert_eq!(score("   \n", JD), 0);
    }

    #[test]
    fn test_identical_documents_score_100() {
        assert_eq!(score(JD, JD), 100);
        assert_eq!(score(RESUME, RESUME), 100);
        let long = "Distributed systems engineer. Rust, Kafka, Postgres, Kubernetes. \
                    Led migration of billing pipeline to event sourcing. "
            .repeat(12);
        assert_eq!(score(&long, &long), 100);
    }

    #[test]
    fn test_score_is_symmetric() {
        assert_eq!(score(JD, RESUME), score(RESUME, JD));
        let a = "Rust tokio axum postgres observability tracing";
        let b = "Go kubernetes postgres tracing grafana prometheus rust";
        assert_eq!(score(a, b), score(b, a));
    }

    #[test]
    fn test_disjoint_documents_score_zero() {
        assert_eq!(score("Rust tokio axum", "Photoshop illustrator typography"), 0);
    }

    #[test]
    fn test_all_stop_word_documents_score_zero() {
        assert_eq!(score("the and of", "with from into"), 0);
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let s = score(JD, RESUME);
        assert!(s > 0 && s < 100, "expected partial overlap, got {s}");
    }

    #[test]
    fn test_cosine_is_bounded() {
        let c = cosine_similarity(JD, RESUME);
        assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn test_single_character_terms_are_ignored() {
        // "c" and "r" fall below the two-character token minimum.
        assert_eq!(score("c r", "c r"), 0);
    }
}
