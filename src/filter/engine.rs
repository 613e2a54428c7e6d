//! Minimum-length, stopword and block-list filtering with deduplication.

use rustc_hash::FxHashSet;

use super::filter_set::FilterSet;
use super::stopwords::StopwordFilter;
use crate::model::Vocabulary;

/// Why a lemma was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    Stopword,
    Blocked,
    Duplicate,
}

/// Filters a validated lemma stream into a [`Vocabulary`].
///
/// Checks run in a fixed order: length (in characters), stopword, filter
/// set, then already seen. Accepted lemmas keep their encounter order.
///
/// # Example
/// ```
/// use wordsift::filter::{FilterEngine, FilterSet};
///
/// let engine = FilterEngine::new(3).with_filter_set(FilterSet::new().with_words(["dog"]));
/// let lemmas = ["cat", "the", "dog", "ox", "cat", "jump"].map(String::from);
/// assert_eq!(engine.apply(lemmas).words(), ["cat", "jump"]);
/// ```
#[derive(Debug, Clone)]
pub struct FilterEngine {
    min_length: usize,
    stopwords: StopwordFilter,
    filter_set: FilterSet,
}

impl FilterEngine {
    /// English stopwords, empty filter set.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            stopwords: StopwordFilter::english(),
            filter_set: FilterSet::new(),
        }
    }

    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_filter_set(mut self, filter_set: FilterSet) -> Self {
        self.filter_set = filter_set;
        self
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Check one lemma against everything but the seen set.
    pub fn check(&self, lemma: &str) -> Option<Rejection> {
        if lemma.chars().count() < self.min_length {
            Some(Rejection::TooShort)
        } else if self.stopwords.is_stopword(lemma) {
            Some(Rejection::Stopword)
        } else if self.filter_set.contains(lemma) {
            Some(Rejection::Blocked)
        } else {
            None
        }
    }

    /// Filter and deduplicate, keeping first occurrences.
    pub fn apply<I>(&self, lemmas: I) -> Vocabulary
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut words = Vec::new();
        for lemma in lemmas {
            if let Some(reason) = self.check(&lemma) {
                log::trace!("rejected {:?}: {:?}", lemma, reason);
                continue;
            }
            if seen.contains(&lemma) {
                continue;
            }
            seen.insert(lemma.clone());
            words.push(lemma);
        }
        Vocabulary::from_unique(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmas(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_min_length() {
        let engine = FilterEngine::new(5);
        let out = engine.apply(lemmas(&["cat", "jump", "quickly"]));
        assert_eq!(out.words(), ["quickly"]);
    }

    #[test]
    fn test_min_length_counts_chars() {
        let engine = FilterEngine::new(4).with_stopwords(StopwordFilter::empty());
        assert_eq!(engine.check("café"), None);
        assert_eq!(engine.check("été"), Some(Rejection::TooShort));
    }

    #[test]
    fn test_stopwords_removed() {
        let engine = FilterEngine::new(1);
        let out = engine.apply(lemmas(&["the", "cat", "be", "and"]));
        assert_eq!(out.words(), ["cat"]);
    }

    #[test]
    fn test_filter_set() {
        let engine = FilterEngine::new(3).with_filter_set(FilterSet::new().with_words(["Cat"]));
        assert_eq!(engine.check("cat"), Some(Rejection::Blocked));
        assert!(engine.apply(lemmas(&["cat"])).is_empty());
    }

    #[test]
    fn test_first_occurrence_order() {
        let engine = FilterEngine::new(3);
        let out = engine.apply(lemmas(&["run", "cat", "run", "jump", "cat"]));
        assert_eq!(out.words(), ["run", "cat", "jump"]);
    }

    #[test]
    fn test_idempotent() {
        let engine = FilterEngine::new(3);
        let once = engine.apply(lemmas(&["run", "the", "cat", "run", "ox"]));
        let twice = engine.apply(once.clone().into_words());
        assert_eq!(once, twice);
    }
}
