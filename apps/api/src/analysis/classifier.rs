//! Match classifier — partitions ranked keywords into found / missing against a document.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::word_runs;

/// How a keyword is tested against the comparison text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain substring containment. "art" is found inside "start".
    #[default]
    Substring,
    /// The keyword must occur as a complete run of letters and hyphens.
    WholeWord,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "whole_word" | "whole-word" | "word" => Ok(MatchMode::WholeWord),
            other => Err(format!(
                "unknown match mode '{other}' (expected 'substring' or 'whole_word')"
            )),
        }
    }
}

/// Keywords split by presence in the comparison document. Order follows the input ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

/// Classifies each keyword as found or missing in `comparison`.
pub fn classify<'a, I>(keywords: I, comparison: &str, mode: MatchMode) -> MatchResult
where
    I: IntoIterator<Item = &'a str>,
{
    let haystack = comparison.to_lowercase();
    let words: HashSet<&str> = match mode {
        MatchMode::Substring => HashSet::new(),
        MatchMode::WholeWord => word_runs(&haystack).collect(),
    };

    let mut result = MatchResult::default();
    for keyword in keywords {
        let needle = keyword.to_lowercase();
        let present = match mode {
            MatchMode::Substring => haystack.contains(&needle),
            MatchMode::WholeWord => words.contains(needle.as_str()),
        };
        if present {
            result.found.push(keyword.to_string());
        } else {
            result.missing.push(keyword.to_string());
        }
    }
    result
}
