//! Part-of-speech categories and tagged tokens.

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech category used to pick a lemmatization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosCategory {
    Adjective,
    Verb,
    Noun,
    Adverb,
    /// Tag outside the mapping table; lemmatized with the noun rule
    Unknown,
}

impl PosCategory {
    /// Map a Penn-Treebank-style tag to a category by its first letter.
    ///
    /// `J*` → adjective, `V*` → verb, `N*` → noun, `R*` → adverb;
    /// everything else (including the empty tag) is [`PosCategory::Unknown`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.as_bytes().first() {
            Some(b'J') => PosCategory::Adjective,
            Some(b'V') => PosCategory::Verb,
            Some(b'N') => PosCategory::Noun,
            Some(b'R') => PosCategory::Adverb,
            _ => PosCategory::Unknown,
        }
    }

    /// The category whose lemmatization rule applies. Unknown uses nouns.
    pub fn rule_category(self) -> Self {
        match self {
            PosCategory::Unknown => PosCategory::Noun,
            other => other,
        }
    }
}

/// A token paired with its part-of-speech category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    /// Lowercase surface form
    pub token: String,

    /// Category derived from the tagger's output tag
    pub pos: PosCategory,
}

impl TaggedToken {
    /// Pair a token with the category for `tag`.
    pub fn from_tag(token: impl Into<String>, tag: &str) -> Self {
        Self {
            token: token.into(),
            pos: PosCategory::from_tag(tag),
        }
    }
}
