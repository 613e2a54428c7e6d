//! Lexical segmentation of cleaned text into candidate tokens.
//!
//! Maximal runs of letters and hyphens are extracted, lowercased, and
//! stripped of anything that is not a lowercase letter. No filtering or
//! deduplication happens here.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}-]+").expect("valid word regex"));

/// Splits text into lowercase candidate tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize `text`, in order of appearance.
    ///
    /// # Example
    /// ```
    /// use wordsift::Tokenizer;
    ///
    /// let tokens = Tokenizer::new().tokenize("Well-known CATS, 42 of them!");
    /// assert_eq!(tokens, vec!["wellknown", "cats", "of", "them"]);
    /// ```
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        self.tokenize_into(text, &mut tokens);
        tokens
    }

    /// Append the tokens of `text` to `out`.
    pub fn tokenize_into(&self, text: &str, out: &mut Vec<String>) {
        for m in WORD_RE.find_iter(text) {
            let token: String = m
                .as_str()
                .to_lowercase()
                .chars()
                .filter(|c| c.is_alphabetic() && c.is_lowercase())
                .collect();
            if !token.is_empty() {
                out.push(token);
            }
        }
    }
}

/// Tokenize with the default tokenizer.
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::new().tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_sentence() {
        assert_eq!(
            tokenize("The cats are running and jumped quickly."),
            vec!["the", "cats", "are", "running", "and", "jumped", "quickly"]
        );
    }

    #[test]
    fn test_lowercases() {
        assert_eq!(tokenize("Run run RUNNING Ran"), vec!["run", "run", "running", "ran"]);
    }

    #[test]
    fn test_hyphens_stripped_and_bare_hyphens_dropped() {
        assert_eq!(tokenize("mother-in-law -- x"), vec!["motherinlaw", "x"]);
    }

    #[test]
    fn test_digits_split_words() {
        assert_eq!(tokenize("abc123def"), vec!["abc", "def"]);
    }

    #[test]
    fn test_apostrophes_split_contractions() {
        assert_eq!(tokenize("don't"), vec!["don", "t"]);
    }

    #[test]
    fn test_non_latin_letters_kept() {
        assert_eq!(tokenize("Café über"), vec!["café", "über"]);
    }

    #[test]
    fn test_no_deduplication() {
        assert_eq!(tokenize("cat cat"), vec!["cat", "cat"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("123 !!! ---").is_empty());
    }
}
