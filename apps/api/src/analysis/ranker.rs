//! Keyword ranker — frequency counting with first-appearance tie breaking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of keywords retained from a job description by default.
pub const DEFAULT_KEYWORD_LIMIT: usize = 25;

/// One ranked keyword and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedKeyword {
    pub keyword: String,
    pub frequency: u32,
}

/// Keywords of a single document, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRanking {
    pub entries: Vec<RankedKeyword>,
}

impl KeywordRanking {
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.keyword.as_str())
    }

    /// The first `n` keywords, for display.
    pub fn top(&self, n: usize) -> Vec<String> {
        self.keywords().take(n).map(String::from).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ranks tokens by frequency and keeps the top `limit`.
pub fn rank(tokens: &[String], limit: usize) -> KeywordRanking {
    let mut ranking = rank_all(tokens);
    ranking.entries.truncate(limit);
    ranking
}

/// Ranks every distinct token.
///
/// Counting is insertion-ordered and the sort is stable, so equal counts keep the
/// order in which each token first appeared.
pub fn rank_all(tokens: &[String]) -> KeywordRanking {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<RankedKeyword> = Vec::new();

    for token in tokens {
        match index.get(token.as_str()) {
            Some(&i) => entries[i].frequency += 1,
            None => {
                index.insert(token.as_str(), entries.len());
                entries.push(RankedKeyword {
                    keyword: token.clone(),
                    frequency: 1,
                });
            }
        }
    }

    entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    KeywordRanking { entries }
}
