//! Tagger + rule-based reducer backend.

use std::sync::Arc;

use super::morphy::Morphy;
use super::tagger::PosTagger;
use super::{is_alphabetic_word, Engine, Lemmatizer};
use crate::lexicon::Lexicon;
use crate::model::TaggedToken;
use crate::pipeline::{ProgressObserver, Stage};

/// Default backend: tag the whole sequence, reduce each token with
/// [`Morphy`] using its tag, then keep lemmas the lexicon knows.
#[derive(Clone)]
pub struct FastLemmatizer {
    tagger: Arc<dyn PosTagger>,
    lexicon: Arc<Lexicon>,
}

impl FastLemmatizer {
    pub fn new(tagger: Arc<dyn PosTagger>, lexicon: Arc<Lexicon>) -> Self {
        Self { tagger, lexicon }
    }

    /// Tag `tokens` and map each tag to its category.
    pub fn tag(&self, tokens: &[String]) -> Vec<TaggedToken> {
        let tags = self.tagger.tag(tokens);
        tokens
            .iter()
            .zip(tags.iter())
            .map(|(token, tag)| TaggedToken::from_tag(token.clone(), tag))
            .collect()
    }

    /// Reduce one tagged token; `None` when the result is not a valid word.
    pub fn lemmatize_token(&self, tagged: &TaggedToken) -> Option<String> {
        if !is_alphabetic_word(&tagged.token) {
            return None;
        }
        let lemma = Morphy::new(&self.lexicon).lemmatize(&tagged.token, tagged.pos);
        if is_alphabetic_word(&lemma) && self.lexicon.is_valid_word(&lemma) {
            Some(lemma)
        } else {
            log::trace!("dropping {:?}: no valid lemma", tagged.token);
            None
        }
    }

    /// Lemmatize without progress events.
    pub(crate) fn lemmatize_quiet(&self, tokens: &[String]) -> Vec<String> {
        self.tag(tokens)
            .iter()
            .filter_map(|t| self.lemmatize_token(t))
            .collect()
    }
}

impl std::fmt::Debug for FastLemmatizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastLemmatizer")
            .field("tagger", &self.tagger.name())
            .field("lexicon_len", &self.lexicon.len())
            .finish()
    }
}

impl Lemmatizer for FastLemmatizer {
    fn engine(&self) -> Engine {
        Engine::Fast
    }

    fn lemmatize(&self, tokens: &[String], observer: &dyn ProgressObserver) -> Vec<String> {
        if tokens.is_empty() {
            return Vec::new();
        }
        let lemmas = self.lemmatize_quiet(tokens);
        observer.on_batch_progress(Stage::Lemmatize, 1, 1);
        lemmas
    }
}
