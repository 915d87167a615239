// Keyword extraction and match scoring.
// Everything here is synchronous and side-effect-free; `Analyzer` is built once at
// startup and shared read-only across requests.

pub mod classifier;
pub mod handlers;
pub mod ranker;
pub mod report;
pub mod similarity;
pub mod stop_words;
pub mod template;
pub mod tokenizer;

use classifier::MatchMode;
use stop_words::StopWordSet;

/// Fixed configuration of the keyword pipeline.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    pub stop_words: StopWordSet,
    pub match_mode: MatchMode,
}

impl Analyzer {
    pub fn new(match_mode: MatchMode) -> Self {
        Self {
            stop_words: StopWordSet::default(),
            match_mode,
        }
    }
}
