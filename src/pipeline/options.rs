//! Pipeline options and configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::parse_word_list;
use crate::lemma::Engine;
use crate::order::OrderMode;

/// Default contextual-model batch size, in tokens.
pub const DEFAULT_BATCH_SIZE: usize = 50_000;

/// Default minimum lemma length, in characters.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Options for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineOptions {
    /// Lemmatizer backend
    pub engine: Engine,

    /// Minimum lemma length retained (must be positive)
    pub min_length: usize,

    /// Preset block lists to apply, by name
    pub presets: Vec<String>,

    /// Custom block list
    pub custom_filter: Option<Vec<String>>,

    /// Output ordering
    pub order: OrderMode,

    /// Tokens per contextual-model batch
    pub batch_size: usize,

    /// Whether to NFC-normalize cleaned text
    pub normalize_unicode: bool,
}

impl PipelineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON. Unknown fields are rejected.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Set the lemmatizer backend.
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Use the contextual backend.
    pub fn accurate(mut self) -> Self {
        self.engine = Engine::Accurate;
        self
    }

    /// Set minimum lemma length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Replace the preset list.
    pub fn with_presets<I, S>(mut self, presets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.presets = presets.into_iter().map(Into::into).collect();
        self
    }

    /// Add one preset.
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.presets.push(preset.into());
        self
    }

    /// Set the custom block list.
    pub fn with_custom_filter<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_filter = Some(words.into_iter().map(Into::into).collect());
        self
    }

    /// Set the custom block list from raw text (whitespace/comma separated).
    pub fn with_custom_filter_text(mut self, text: &str) -> Self {
        self.custom_filter = Some(parse_word_list(text));
        self
    }

    /// Set output ordering.
    pub fn with_order(mut self, order: OrderMode) -> Self {
        self.order = order;
        self
    }

    /// Set contextual-model batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_normalize_unicode(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.min_length == 0 {
            return Err(Error::InvalidOption("min_length must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidOption("batch_size must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            engine: Engine::Fast,
            min_length: DEFAULT_MIN_LENGTH,
            presets: Vec::new(),
            custom_filter: None,
            order: OrderMode::Original,
            batch_size: DEFAULT_BATCH_SIZE,
            normalize_unicode: true,
        }
    }
}
