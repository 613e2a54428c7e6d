//! Loaded linguistic resources.
//!
//! [`Resources`] is built once by an explicit initialization step and then
//! shared read-only by every pipeline run. Nothing is loaded lazily or held
//! in a global.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::PresetLibrary;
use crate::lemma::{ContextualModel, LookupModel, PerceptronTagger, PosTagger, RuleTagger};
use crate::lexicon::Lexicon;

/// Where to find resources on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// WordNet `dict/` directory
    pub wordnet_dir: PathBuf,

    /// Perceptron tagger JSON; the rule tagger is used when absent
    pub tagger_model: Option<PathBuf>,

    /// Contextual lemma table for the accurate backend
    pub lemma_model: Option<PathBuf>,

    /// Directory of `*.txt` preset block lists
    pub preset_dir: Option<PathBuf>,
}

impl ResourceConfig {
    pub fn new(wordnet_dir: impl Into<PathBuf>) -> Self {
        Self {
            wordnet_dir: wordnet_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_tagger_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.tagger_model = Some(path.into());
        self
    }

    pub fn with_lemma_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.lemma_model = Some(path.into());
        self
    }

    pub fn with_preset_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.preset_dir = Some(path.into());
        self
    }
}

/// Immutable handle to the lexicon, taggers, models and presets.
#[derive(Clone)]
pub struct Resources {
    lexicon: Arc<Lexicon>,
    tagger: Arc<dyn PosTagger>,
    contextual: Option<Arc<dyn ContextualModel>>,
    presets: PresetLibrary,
}

impl Resources {
    /// Wrap a lexicon with the rule tagger, no contextual model and no presets.
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
            tagger: Arc::new(RuleTagger::new()),
            contextual: None,
            presets: PresetLibrary::new(),
        }
    }

    /// Load everything named by `config`.
    ///
    /// The lexicon, tagger model and preset directory are required once
    /// named. A lemma table that fails to load only disables the accurate
    /// backend.
    pub fn load(config: &ResourceConfig) -> Result<Self> {
        let mut resources = Self::new(Lexicon::load_dir(&config.wordnet_dir)?);

        if let Some(path) = &config.tagger_model {
            resources.tagger = Arc::new(PerceptronTagger::load(path)?);
        }

        if let Some(path) = &config.lemma_model {
            match LookupModel::load(path, Arc::clone(&resources.tagger)) {
                Ok(model) => resources.contextual = Some(Arc::new(model)),
                Err(e) => log::warn!("accurate backend disabled: {}", e),
            }
        }

        if let Some(dir) = &config.preset_dir {
            resources.presets = PresetLibrary::load_dir(dir)?;
        }

        Ok(resources)
    }

    /// Replace the tagger.
    pub fn with_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    /// Install a contextual model for the accurate backend.
    pub fn with_contextual_model(mut self, model: Arc<dyn ContextualModel>) -> Self {
        self.contextual = Some(model);
        self
    }

    /// Replace the preset library.
    pub fn with_presets(mut self, presets: PresetLibrary) -> Self {
        self.presets = presets;
        self
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    pub fn tagger(&self) -> &Arc<dyn PosTagger> {
        &self.tagger
    }

    pub fn contextual_model(&self) -> Option<&Arc<dyn ContextualModel>> {
        self.contextual.as_ref()
    }

    pub fn presets(&self) -> &PresetLibrary {
        &self.presets
    }
}

impl std::fmt::Debug for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resources")
            .field("lexicon_len", &self.lexicon.len())
            .field("tagger", &self.tagger.name())
            .field("contextual", &self.contextual.as_ref().map(|m| m.name().to_string()))
            .field("presets", &self.presets.len())
            .finish()
    }
}
