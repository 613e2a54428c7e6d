//! # wordsift
//!
//! Vocabulary extraction for language learners.
//!
//! This library turns subtitles, word-processor documents and plain text
//! into a deduplicated list of dictionary lemmas: markup is stripped,
//! text is tokenized, every token is reduced to its base form using its
//! part of speech, and only real words that pass the configured filters
//! are kept.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wordsift::{ResourceConfig, Resources, SourceDocument, Wordsift};
//!
//! fn main() -> wordsift::Result<()> {
//!     // Load the lexical database once
//!     let resources = Resources::load(&ResourceConfig::new("/usr/share/wordnet/dict"))?;
//!
//!     let sources = vec![SourceDocument::read("episode01.srt")?];
//!     let result = Wordsift::new()
//!         .with_min_length(4)
//!         .alphabetical()
//!         .run(&resources, &sources);
//!
//!     println!("{}", wordsift::export::to_text(&result.words));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Formats**: SRT, WebVTT, ASS/SSA, DOCX and plain text in any common encoding
//! - **Two lemmatizer backends**: a fast tagger + rule-based reducer, and an
//!   optional contextual model processed in bounded batches
//! - **Lexical validation** against a WordNet dictionary
//! - **Filtering**: minimum length, stopwords, preset and custom block lists
//! - **Ordering**: original, alphabetical or shuffled
//! - **Export**: newline-separated text, fixed-size chunks, a local library

pub mod clean;
pub mod detect;
pub mod error;
pub mod export;
pub mod filter;
pub mod lemma;
pub mod lexicon;
pub mod library;
pub mod model;
pub mod order;
pub mod pipeline;
pub mod resources;
pub mod tokenize;

// Re-export commonly used types
pub use clean::{CleanedText, CleanerRegistry, FormatCleaner};
pub use detect::{detect_format, detect_format_from_name, SourceFormat};
pub use error::{Error, Result};
pub use filter::{FilterEngine, FilterSet, PresetLibrary, StopwordFilter};
pub use lemma::{
    AccurateLemmatizer, ContextualModel, Engine, FastLemmatizer, Lemmatizer, LookupModel, Morphy,
    PerceptronTagger, PosTagger, RuleTagger,
};
pub use lexicon::{Lexicon, LexiconBuilder};
pub use library::{Library, LibraryEntry};
pub use model::{PosCategory, SourceDocument, TaggedToken, Vocabulary};
pub use order::OrderMode;
pub use pipeline::{
    ExtractionResult, ExtractionStats, NoopObserver, Pipeline, PipelineOptions,
    ProgressObserver, SourceReport, Stage,
};
pub use resources::{ResourceConfig, Resources};
pub use tokenize::Tokenizer;

use std::path::Path;

/// Extract a vocabulary from in-memory sources.
///
/// # Example
///
/// ```
/// use wordsift::{extract, Lexicon, PipelineOptions, PosCategory, Resources, SourceDocument};
///
/// let resources = Resources::new(Lexicon::builder().word(PosCategory::Noun, "cat").build());
/// let sources = [SourceDocument::from_text("a.txt", "Cats! More cats.")];
/// let result = extract(&resources, &sources, PipelineOptions::default());
/// assert_eq!(result.words.words(), ["cat"]);
/// ```
pub fn extract(
    resources: &Resources,
    sources: &[SourceDocument],
    options: PipelineOptions,
) -> ExtractionResult {
    Pipeline::new(resources, options).run(sources)
}

/// Extract a vocabulary from a single piece of text.
pub fn extract_text(resources: &Resources, text: &str, options: PipelineOptions) -> ExtractionResult {
    extract(resources, &[SourceDocument::from_text("input.txt", text)], options)
}

/// Read files and extract a vocabulary from them.
///
/// Fails only when a file cannot be read; decoding and format problems are
/// reported on the result.
pub fn extract_files<P: AsRef<Path>>(
    resources: &Resources,
    paths: &[P],
    options: PipelineOptions,
) -> Result<ExtractionResult> {
    let sources = paths
        .iter()
        .map(SourceDocument::read)
        .collect::<Result<Vec<_>>>()?;
    Ok(extract(resources, &sources, options))
}

/// Builder for extraction runs.
///
/// # Example
///
/// ```no_run
/// use wordsift::{ResourceConfig, Resources, Wordsift};
///
/// let resources = Resources::load(&ResourceConfig::new("./dict"))?;
/// let result = Wordsift::new()
///     .accurate()
///     .with_preset("cet4")
///     .with_custom_filter(["hello", "okay"])
///     .shuffled()
///     .run_files(&resources, &["movie.srt", "notes.docx"])?;
/// println!("{} words", result.stats.word_count);
/// # Ok::<(), wordsift::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Wordsift {
    options: PipelineOptions,
}

impl Wordsift {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing options.
    pub fn with_options(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Set the lemmatizer backend.
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.options = self.options.with_engine(engine);
        self
    }

    /// Use the contextual backend (falls back to fast when unavailable).
    pub fn accurate(mut self) -> Self {
        self.options = self.options.accurate();
        self
    }

    /// Set minimum lemma length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.options = self.options.with_min_length(min_length);
        self
    }

    /// Add a preset block list.
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.options = self.options.with_preset(preset);
        self
    }

    /// Set the custom block list.
    pub fn with_custom_filter<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.with_custom_filter(words);
        self
    }

    /// Set output ordering.
    pub fn with_order(mut self, order: OrderMode) -> Self {
        self.options = self.options.with_order(order);
        self
    }

    /// Sort the output alphabetically.
    pub fn alphabetical(self) -> Self {
        self.with_order(OrderMode::Alphabetical)
    }

    /// Shuffle the output.
    pub fn shuffled(self) -> Self {
        self.with_order(OrderMode::Shuffled)
    }

    /// Set contextual-model batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.options = self.options.with_batch_size(batch_size);
        self
    }

    /// The accumulated options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run over in-memory sources.
    pub fn run(&self, resources: &Resources, sources: &[SourceDocument]) -> ExtractionResult {
        extract(resources, sources, self.options.clone())
    }

    /// Run over in-memory sources, reporting progress.
    pub fn run_with_observer(
        &self,
        resources: &Resources,
        sources: &[SourceDocument],
        observer: &dyn ProgressObserver,
    ) -> ExtractionResult {
        Pipeline::new(resources, self.options.clone())
            .with_observer(observer)
            .run(sources)
    }

    /// Read files and run over them.
    pub fn run_files<P: AsRef<Path>>(
        &self,
        resources: &Resources,
        paths: &[P],
    ) -> Result<ExtractionResult> {
        extract_files(resources, paths, self.options.clone())
    }
}
