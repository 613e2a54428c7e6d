//! Part-of-speech tagging and lemmatization.
//!
//! Two interchangeable backends implement [`Lemmatizer`]:
//!
//! - [`FastLemmatizer`]: a [`PosTagger`] over the whole token sequence, then
//!   the rule-based [`Morphy`] reducer guided by the tag, then validation
//!   against the [`Lexicon`](crate::Lexicon).
//! - [`AccurateLemmatizer`]: a [`ContextualModel`] applied in fixed-size
//!   batches, keeping only alphabetic lemmas the lexicon knows.
//!
//! Both return already-validated lemmas in token order.

mod accurate;
mod fast;
mod morphy;
mod perceptron;
mod tagger;

pub use accurate::{AccurateLemmatizer, ContextualModel, LookupModel};
pub use fast::FastLemmatizer;
pub use morphy::Morphy;
pub use perceptron::{PerceptronModel, PerceptronTagger};
pub use tagger::{PosTagger, RuleTagger};

use serde::{Deserialize, Serialize};

use crate::pipeline::ProgressObserver;

/// Lemmatizer backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Statistical tagger + rule-based reducer
    #[default]
    Fast,
    /// Contextual model in batches; falls back to `Fast` when unavailable
    Accurate,
}

impl Engine {
    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Engine::Fast => "fast",
            Engine::Accurate => "accurate",
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Engine {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(Engine::Fast),
            "accurate" => Ok(Engine::Accurate),
            other => Err(crate::Error::InvalidOption(format!("unknown engine: {}", other))),
        }
    }
}

/// A lemmatizer backend.
pub trait Lemmatizer {
    /// Which backend this is.
    fn engine(&self) -> Engine;

    /// Reduce `tokens` to validated lemmas, in token order.
    ///
    /// Tokens that yield no valid lemma are dropped. `observer` receives
    /// `(completed, total)` batch counts.
    fn lemmatize(&self, tokens: &[String], observer: &dyn ProgressObserver) -> Vec<String>;
}

/// Whether a lemma is non-empty and made only of letters.
pub(crate) fn is_alphabetic_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_parse() {
        assert_eq!("fast".parse::<Engine>().unwrap(), Engine::Fast);
        assert_eq!("Accurate".parse::<Engine>().unwrap(), Engine::Accurate);
        assert!("spacy".parse::<Engine>().is_err());
    }

    #[test]
    fn test_engine_serde() {
        assert_eq!(serde_json::to_string(&Engine::Accurate).unwrap(), "\"accurate\"");
        let engine: Engine = serde_json::from_str("\"fast\"").unwrap();
        assert_eq!(engine, Engine::Fast);
    }

    #[test]
    fn test_is_alphabetic_word() {
        assert!(is_alphabetic_word("run"));
        assert!(!is_alphabetic_word(""));
        assert!(!is_alphabetic_word("ice_cream"));
        assert!(!is_alphabetic_word("r2d2"));
    }
}
