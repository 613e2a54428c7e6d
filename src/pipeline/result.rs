//! Extraction result with per-source reports and statistics.

use serde::{Deserialize, Serialize};

use crate::detect::SourceFormat;
use crate::lemma::Engine;
use crate::model::Vocabulary;

/// Result of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Ordered unique lemmas
    pub words: Vocabulary,

    /// Run statistics
    pub stats: ExtractionStats,

    /// One report per input source, in input order
    pub sources: Vec<SourceReport>,

    /// Backend that actually lemmatized (after any fallback)
    pub engine: Engine,

    /// Run-level recoverable conditions (fallbacks, unknown presets, empty input)
    pub notices: Vec<String>,
}

impl ExtractionResult {
    /// Empty result for `engine`, used when there is nothing to lemmatize.
    pub fn empty(engine: Engine) -> Self {
        Self {
            words: Vocabulary::new(),
            stats: ExtractionStats::default(),
            sources: Vec::new(),
            engine,
            notices: Vec::new(),
        }
    }

    /// Sources that reported a problem.
    pub fn issues(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|s| s.issue.is_some())
    }

    /// Whether any source or run-level condition was reported.
    pub fn has_warnings(&self) -> bool {
        !self.notices.is_empty() || self.sources.iter().any(|s| s.issue.is_some())
    }
}

/// Statistics collected during extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of source files given to the run
    pub files_processed: usize,

    /// Number of sources that produced non-empty text
    pub files_with_text: usize,

    /// Tokens after segmentation
    pub token_count: usize,

    /// Validated lemmas before filtering
    pub lemma_count: usize,

    /// Accepted unique lemmas
    pub word_count: usize,
}

/// Outcome for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    /// Source file name
    pub name: String,

    /// Detected format name
    pub format: String,

    /// Encoding used to decode the bytes, when applicable
    pub encoding: Option<String>,

    /// Characters of cleaned text
    pub char_count: usize,

    /// Recoverable problem, if any
    pub issue: Option<String>,
}

impl SourceReport {
    pub(crate) fn new(name: &str, format: SourceFormat) -> Self {
        Self {
            name: name.to_string(),
            format: format.name().to_string(),
            encoding: None,
            char_count: 0,
            issue: None,
        }
    }
}
