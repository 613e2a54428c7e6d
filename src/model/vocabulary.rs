//! The ordered result list of unique lemmas.

use serde::{Deserialize, Serialize};

/// Ordered sequence of unique lowercase lemmas.
///
/// Built once per pipeline run and not mutated afterward; reordering
/// produces a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-deduplicated list.
    pub(crate) fn from_unique(words: Vec<String>) -> Self {
        Self { words }
    }

    /// Number of lemmas.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no lemma survived.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The lemmas in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Iterate over the lemmas.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }

    /// Whether `word` is in the list.
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Consume into the inner list.
    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

/// Keeps the first occurrence of each word.
impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut seen = rustc_hash::FxHashSet::default();
        let words = iter
            .into_iter()
            .map(Into::into)
            .filter(|w: &String| seen.insert(w.clone()))
            .collect();
        Self { words }
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(words: Vec<String>) -> Self {
        words.into_iter().collect()
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.words
    }
}

impl AsRef<[String]> for Vocabulary {
    fn as_ref(&self) -> &[String] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_accessors() {
        let vocab = Vocabulary::from_unique(vec!["cat".into(), "run".into()]);
        assert_eq!(vocab.len(), 2);
        assert!(vocab.contains("run"));
        assert!(!vocab.contains("dog"));
        assert_eq!(vocab.words()[0], "cat");
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let vocab = Vocabulary::from_unique(vec!["cat".into()]);
        assert_eq!(serde_json::to_string(&vocab).unwrap(), r#"["cat"]"#);
    }

    #[test]
    fn test_collect_deduplicates() {
        let vocab: Vocabulary = ["run", "cat", "run"].into_iter().collect();
        assert_eq!(vocab.words(), ["run", "cat"]);

        let parsed: Vocabulary = serde_json::from_str(r#"["a","b","a"]"#).unwrap();
        assert_eq!(parsed.len(), 2);
    }
}
