//! Text normalizer & tokenizer — raw document text to candidate keyword tokens.

use std::sync::OnceLock;

use regex::Regex;

use crate::analysis::stop_words::StopWordSet;

/// Tokens of this length or shorter are discarded.
const MIN_TOKEN_LEN_EXCLUSIVE: usize = 2;

fn word_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[a-z-]+").expect("word run pattern is valid"))
}

/// Splits `text` into lowercase runs of letters and hyphens, in order of appearance.
///
/// Edge hyphens are trimmed from each run; runs that are all hyphens are dropped.
pub fn word_runs(text: &str) -> impl Iterator<Item = &str> {
    word_run_pattern()
        .find_iter(text)
        .map(|m| m.as_str().trim_matches('-'))
        .filter(|run| !run.is_empty())
}

/// Extracts candidate keyword tokens from a document.
///
/// Duplicates are retained: frequency is the ranker's signal.
pub fn tokenize(text: &str, stop_words: &StopWordSet) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_runs(&lowered)
        .filter(|run| run.len() > MIN_TOKEN_LEN_EXCLUSIVE)
        .filter(|run| !stop_words.contains(run))
        .map(String::from)
        .collect()
}
