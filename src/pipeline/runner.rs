//! The extraction pipeline runner.

use crate::clean::CleanerRegistry;
use crate::error::Error;
use crate::filter::FilterEngine;
use crate::lemma::{AccurateLemmatizer, Engine, FastLemmatizer, Lemmatizer};
use crate::model::SourceDocument;
use crate::order::apply_order;
use crate::resources::Resources;
use crate::tokenize::Tokenizer;

use super::observer::{NoopObserver, ProgressObserver, Stage};
use super::options::PipelineOptions;
use super::result::{ExtractionResult, ExtractionStats, SourceReport};

/// Runs sources through clean → tokenize → lemmatize → filter → order.
///
/// A run never fails: per-file problems land on [`SourceReport`]s and
/// run-level conditions on [`ExtractionResult::notices`].
///
/// # Example
///
/// ```
/// use wordsift::{Lexicon, Pipeline, PipelineOptions, PosCategory, Resources, SourceDocument};
///
/// let lexicon = Lexicon::builder()
///     .words(PosCategory::Noun, ["cat", "dog"])
///     .build();
/// let resources = Resources::new(lexicon);
/// let sources = vec![SourceDocument::from_text("notes.txt", "Cats chase dogs.")];
///
/// let result = Pipeline::new(&resources, PipelineOptions::default()).run(&sources);
/// assert_eq!(result.words.words(), ["cat", "dog"]);
/// assert_eq!(result.stats.files_processed, 1);
/// ```
pub struct Pipeline<'a> {
    resources: &'a Resources,
    options: PipelineOptions,
    cleaners: CleanerRegistry,
    observer: &'a dyn ProgressObserver,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline over shared resources.
    pub fn new(resources: &'a Resources, options: PipelineOptions) -> Self {
        let cleaners =
            CleanerRegistry::with_defaults().with_normalize_unicode(options.normalize_unicode);
        Self {
            resources,
            options,
            cleaners,
            observer: &NoopObserver,
        }
    }

    /// Report progress to `observer`.
    pub fn with_observer(mut self, observer: &'a dyn ProgressObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Replace the cleaner registry.
    pub fn with_cleaners(mut self, cleaners: CleanerRegistry) -> Self {
        self.cleaners = cleaners.with_normalize_unicode(self.options.normalize_unicode);
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run the pipeline over `sources`, in order.
    pub fn run(&self, sources: &[SourceDocument]) -> ExtractionResult {
        let mut notices = Vec::new();
        let mut options = self.options.clone();
        if let Err(e) = options.validate() {
            log::warn!("{}; using defaults for invalid values", e);
            notices.push(e.to_string());
            let defaults = PipelineOptions::default();
            if options.min_length == 0 {
                options.min_length = defaults.min_length;
            }
            if options.batch_size == 0 {
                options.batch_size = defaults.batch_size;
            }
        }

        if sources.is_empty() {
            log::info!("{}", Error::EmptyInput);
            let mut result = ExtractionResult::empty(options.engine);
            notices.push(Error::EmptyInput.to_string());
            result.notices = notices;
            return result;
        }

        // Clean and tokenize, one file at a time.
        let tokenizer = Tokenizer::new();
        let mut tokens = Vec::new();
        let mut reports = Vec::with_capacity(sources.len());
        let mut files_with_text = 0;
        for (index, source) in sources.iter().enumerate() {
            let cleaned = self.cleaners.clean(source);
            let mut report = SourceReport::new(&source.name, source.format());
            report.encoding = cleaned.encoding.map(str::to_string);
            report.char_count = cleaned.text.chars().count();
            report.issue = cleaned.issue.as_ref().map(Error::to_string);
            if cleaned.has_text() {
                files_with_text += 1;
                tokenizer.tokenize_into(&cleaned.text, &mut tokens);
            }
            reports.push(report);
            self.observer
                .on_batch_progress(Stage::Clean, index + 1, sources.len());
        }

        if files_with_text == 0 {
            log::info!("{}", Error::EmptyInput);
            notices.push(Error::EmptyInput.to_string());
        }

        let (lemmas, engine) = self.lemmatize(&tokens, &options, &mut notices);

        let (filter_set, missing) = self
            .resources
            .presets()
            .build_filter_set(&options.presets, options.custom_filter.as_deref().unwrap_or(&[]));
        notices.extend(missing.iter().map(Error::to_string));

        let filter = FilterEngine::new(options.min_length).with_filter_set(filter_set);
        let lemma_count = lemmas.len();
        let words = apply_order(filter.apply(lemmas), options.order);

        let stats = ExtractionStats {
            files_processed: sources.len(),
            files_with_text,
            token_count: tokens.len(),
            lemma_count,
            word_count: words.len(),
        };
        log::info!(
            "extracted {} words from {} files ({} tokens, {} lemmas, {} engine)",
            stats.word_count,
            stats.files_processed,
            stats.token_count,
            stats.lemma_count,
            engine
        );

        ExtractionResult {
            words,
            stats,
            sources: reports,
            engine,
            notices,
        }
    }

    /// Pick the backend, falling back to the fast one when the accurate one
    /// cannot be built.
    fn lemmatize(
        &self,
        tokens: &[String],
        options: &PipelineOptions,
        notices: &mut Vec<String>,
    ) -> (Vec<String>, Engine) {
        let fast = FastLemmatizer::new(
            self.resources.tagger().clone(),
            self.resources.lexicon().clone(),
        );

        let backend: Box<dyn Lemmatizer> = match options.engine {
            Engine::Fast => Box::new(fast),
            Engine::Accurate => match AccurateLemmatizer::new(
                self.resources.contextual_model().cloned(),
                self.resources.lexicon().clone(),
                fast.clone(),
                options.batch_size,
            ) {
                Ok(accurate) => Box::new(accurate),
                Err(e) => {
                    log::warn!("{}; falling back to the fast backend", e);
                    notices.push(e.to_string());
                    Box::new(fast)
                }
            },
        };

        let lemmas = backend.lemmatize(tokens, self.observer);
        (lemmas, backend.engine())
    }
}

impl std::fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("resources", self.resources)
            .field("options", &self.options)
            .finish()
    }
}
