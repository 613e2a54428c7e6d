//! Stopword filtering.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE as NLTK};

/// A filter for removing stopwords.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Lowercase stopwords
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// The NLTK English list: articles, pronouns, auxiliaries,
    /// prepositions, conjunctions and contraction fragments.
    pub fn english() -> Self {
        Self {
            stopwords: get(NLTK::English)
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    /// An empty filter (no filtering).
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// A filter from a custom list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add stopwords.
    pub fn add_stopwords(&mut self, words: &[&str]) {
        self.stopwords
            .extend(words.iter().map(|w| w.to_lowercase()));
    }

    /// Check if a lowercase word is a stopword.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_classes() {
        let filter = StopwordFilter::english();
        for word in ["the", "an", "are", "be", "and", "of", "they", "have", "will"] {
            assert!(filter.is_stopword(word), "{} should be a stopword", word);
        }
        for word in ["cat", "run", "jump", "quickly"] {
            assert!(!filter.is_stopword(word), "{} should not be a stopword", word);
        }
    }

    #[test]
    fn test_english_includes_contraction_fragments() {
        let filter = StopwordFilter::english();
        for word in ["don", "isn", "ll", "ve"] {
            assert!(filter.is_stopword(word), "{} should be a stopword", word);
        }
        assert!(filter.len() > 100);
    }

    #[test]
    fn test_custom_list_lowercased() {
        let mut filter = StopwordFilter::from_list(&["Foo"]);
        filter.add_stopwords(&["BAR"]);
        assert!(filter.is_stopword("foo"));
        assert!(filter.is_stopword("bar"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_empty() {
        let filter = StopwordFilter::empty();
        assert!(filter.is_empty());
        assert!(!filter.is_stopword("the"));
    }
}
