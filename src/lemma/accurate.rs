//! Contextual model backend.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::fast::FastLemmatizer;
use super::tagger::PosTagger;
use super::{is_alphabetic_word, Engine, Lemmatizer};
use crate::error::{Error, Result};
use crate::lexicon::Lexicon;
use crate::pipeline::{ProgressObserver, Stage};

/// A model that lemmatizes a token sequence using its surrounding context.
///
/// Returns exactly one lemma per input token, in order.
pub trait ContextualModel: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Lemmatize one batch.
    fn lemmatize(&self, tokens: &[String]) -> Result<Vec<String>>;
}

/// Tag-conditioned lemma table.
///
/// Each token in a batch is tagged in context, then looked up by
/// `(form, tag)`. Lookup tries the exact tag, then any entry with the same
/// tag family (first letter), then a wildcard entry. Unlisted forms map to
/// themselves.
///
/// The table file has one `form<TAB>tag<TAB>lemma` entry per line; `*`
/// as the tag matches any tag, and `#` starts a comment line.
pub struct LookupModel {
    entries: FxHashMap<String, Vec<(String, String)>>,
    tagger: Arc<dyn PosTagger>,
}

impl LookupModel {
    /// Create an empty table.
    pub fn new(tagger: Arc<dyn PosTagger>) -> Self {
        Self {
            entries: FxHashMap::default(),
            tagger,
        }
    }

    /// Load a table file.
    pub fn load<P: AsRef<Path>>(path: P, tagger: Arc<dyn PosTagger>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::Model(format!("cannot open {}: {}", path.display(), e)))?;
        let model = Self::from_reader(BufReader::new(file), tagger)?;
        log::info!(
            "loaded lemma table from {}: {} forms",
            path.display(),
            model.len()
        );
        Ok(model)
    }

    /// Parse a table from any reader.
    pub fn from_reader<R: BufRead>(reader: R, tagger: Arc<dyn PosTagger>) -> Result<Self> {
        let mut model = Self::new(tagger);
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            let [form, tag, lemma] = fields.as_slice() else {
                return Err(Error::Model(format!(
                    "lemma table line {}: expected 3 tab-separated fields, got {}",
                    line_no + 1,
                    fields.len()
                )));
            };
            model.insert(form, tag, lemma);
        }
        Ok(model)
    }

    /// Add an entry.
    pub fn insert(&mut self, form: &str, tag: &str, lemma: &str) {
        self.entries
            .entry(form.to_lowercase())
            .or_default()
            .push((tag.to_string(), lemma.to_lowercase()));
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_entry(mut self, form: &str, tag: &str, lemma: &str) -> Self {
        self.insert(form, tag, lemma);
        self
    }

    /// Number of distinct forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, form: &str, tag: &str) -> Option<&str> {
        let entries = self.entries.get(form)?;
        let family = tag.chars().next();
        entries
            .iter()
            .find(|(t, _)| t == tag)
            .or_else(|| {
                entries
                    .iter()
                    .find(|(t, _)| t != "*" && t.chars().next() == family)
            })
            .or_else(|| entries.iter().find(|(t, _)| t == "*"))
            .map(|(_, lemma)| lemma.as_str())
    }
}

impl ContextualModel for LookupModel {
    fn name(&self) -> &str {
        "lookup"
    }

    fn lemmatize(&self, tokens: &[String]) -> Result<Vec<String>> {
        let tags = self.tagger.tag(tokens);
        if tags.len() != tokens.len() {
            return Err(Error::Model(format!(
                "tagger returned {} tags for {} tokens",
                tags.len(),
                tokens.len()
            )));
        }
        Ok(tokens
            .iter()
            .zip(tags.iter())
            .map(|(token, tag)| {
                self.lookup(token, tag)
                    .map(str::to_string)
                    .unwrap_or_else(|| token.clone())
            })
            .collect())
    }
}

impl std::fmt::Debug for LookupModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupModel")
            .field("forms", &self.entries.len())
            .field("tagger", &self.tagger.name())
            .finish()
    }
}

/// Accurate backend: a [`ContextualModel`] over fixed-size batches.
///
/// A batch the model fails on is lemmatized by the fast backend instead,
/// so one bad batch never loses the rest of the run.
pub struct AccurateLemmatizer {
    model: Arc<dyn ContextualModel>,
    lexicon: Arc<Lexicon>,
    fallback: FastLemmatizer,
    batch_size: usize,
}

impl AccurateLemmatizer {
    /// Create the backend.
    ///
    /// Fails with [`Error::BackendUnavailable`] when no model is loaded and
    /// [`Error::InvalidOption`] when `batch_size` is zero.
    pub fn new(
        model: Option<Arc<dyn ContextualModel>>,
        lexicon: Arc<Lexicon>,
        fallback: FastLemmatizer,
        batch_size: usize,
    ) -> Result<Self> {
        let model = model.ok_or_else(|| {
            Error::BackendUnavailable("no contextual lemmatizer model loaded".into())
        })?;
        if batch_size == 0 {
            return Err(Error::InvalidOption("batch_size must be at least 1".into()));
        }
        Ok(Self {
            model,
            lexicon,
            fallback,
            batch_size,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn keep(&self, lemma: String) -> Option<String> {
        let lemma = lemma.to_lowercase();
        (is_alphabetic_word(&lemma) && self.lexicon.is_valid_word(&lemma)).then_some(lemma)
    }
}

impl Lemmatizer for AccurateLemmatizer {
    fn engine(&self) -> Engine {
        Engine::Accurate
    }

    fn lemmatize(&self, tokens: &[String], observer: &dyn ProgressObserver) -> Vec<String> {
        let total = tokens.len().div_ceil(self.batch_size);
        let mut lemmas = Vec::with_capacity(tokens.len());

        for (index, batch) in tokens.chunks(self.batch_size).enumerate() {
            match self.model.lemmatize(batch) {
                Ok(out) if out.len() == batch.len() => {
                    lemmas.extend(out.into_iter().filter_map(|l| self.keep(l)));
                }
                Ok(out) => {
                    log::warn!(
                        "{} returned {} lemmas for {} tokens in batch {}/{}; using fast backend",
                        self.model.name(),
                        out.len(),
                        batch.len(),
                        index + 1,
                        total
                    );
                    lemmas.extend(self.fallback.lemmatize_quiet(batch));
                }
                Err(e) => {
                    log::warn!(
                        "{} failed on batch {}/{}: {}; using fast backend",
                        self.model.name(),
                        index + 1,
                        total,
                        e
                    );
                    lemmas.extend(self.fallback.lemmatize_quiet(batch));
                }
            }
            log::debug!("lemmatized batch {}/{}", index + 1, total);
            observer.on_batch_progress(Stage::Lemmatize, index + 1, total);
        }
        lemmas
    }
}

impl std::fmt::Debug for AccurateLemmatizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccurateLemmatizer")
            .field("model", &self.model.name())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}
