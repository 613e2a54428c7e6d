//! Format cleaners: raw source bytes to plain Unicode text.
//!
//! Each cleaner strips the non-linguistic content of one family of formats
//! (timestamps, markup, table structure). Cleaners never fail: a problem is
//! reported on the returned [`CleanedText`] next to whatever text could be
//! recovered (possibly none).
//!
//! # Example
//!
//! ```
//! use wordsift::clean::CleanerRegistry;
//! use wordsift::SourceDocument;
//!
//! let registry = CleanerRegistry::with_defaults();
//! let source = SourceDocument::from_text(
//!     "clip.srt",
//!     "1\n00:00:01,000 --> 00:00:02,000\nHello world!\n",
//! );
//! let cleaned = registry.clean(&source);
//! assert_eq!(cleaned.text, "Hello world!");
//! assert!(cleaned.issue.is_none());
//! ```

mod docx;
pub mod encoding;
mod subtitle;
mod text;

pub use docx::DocxCleaner;
pub use encoding::{decode_text, Decoded};
pub use subtitle::{AssCleaner, SrtCleaner, WebVttCleaner};
pub use text::{LegacyDocCleaner, PlainTextCleaner};

use crate::detect::SourceFormat;
use crate::error::Error;
use crate::model::SourceDocument;
use std::collections::HashMap;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

/// Text recovered from one source, plus any recoverable problem.
#[derive(Debug)]
pub struct CleanedText {
    /// Plain text with source-specific markup removed
    pub text: String,

    /// Character encoding the bytes were decoded with, when applicable
    pub encoding: Option<&'static str>,

    /// Decode/format problem, if any (the text is still usable)
    pub issue: Option<Error>,
}

impl CleanedText {
    /// Successfully cleaned text.
    pub fn ok(text: String) -> Self {
        Self {
            text,
            encoding: None,
            issue: None,
        }
    }

    /// No text, with the reason.
    pub fn failed(issue: Error) -> Self {
        Self {
            text: String::new(),
            encoding: None,
            issue: Some(issue),
        }
    }

    /// Record the encoding used.
    pub fn with_encoding(mut self, encoding: &'static str) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Attach a recoverable issue.
    pub fn with_issue(mut self, issue: Option<Error>) -> Self {
        self.issue = issue;
        self
    }

    /// Whether any non-whitespace text was recovered.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Convert into a `Result`, discarding any recovered text on failure.
    pub fn into_result(self) -> crate::Result<String> {
        match self.issue {
            Some(err) => Err(err),
            None => Ok(self.text),
        }
    }
}

/// Trait for format cleaners.
///
/// Implement this trait to add support for a new source format.
pub trait FormatCleaner: Send + Sync {
    /// The formats this cleaner handles.
    fn formats(&self) -> &[SourceFormat];

    /// Name of this cleaner.
    fn name(&self) -> &str;

    /// Clean raw bytes. `name` is the source file name, used in reports.
    fn clean(&self, name: &str, data: &[u8]) -> CleanedText;

    /// Check if this cleaner handles the given format.
    fn supports(&self, format: SourceFormat) -> bool {
        self.formats().contains(&format)
    }
}

/// Registry mapping source formats to cleaners.
///
/// Formats without a registered cleaner go through the plain-text cleaner.
pub struct CleanerRegistry {
    cleaners: HashMap<SourceFormat, Arc<dyn FormatCleaner>>,
    fallback: Arc<dyn FormatCleaner>,
    normalize_unicode: bool,
}

impl CleanerRegistry {
    /// Create a registry with only the plain-text fallback.
    pub fn new() -> Self {
        Self {
            cleaners: HashMap::new(),
            fallback: Arc::new(PlainTextCleaner::new()),
            normalize_unicode: true,
        }
    }

    /// Create a registry with all built-in cleaners.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SrtCleaner::new()));
        registry.register(Arc::new(WebVttCleaner::new()));
        registry.register(Arc::new(AssCleaner::new()));
        registry.register(Arc::new(DocxCleaner::new()));
        registry.register(Arc::new(LegacyDocCleaner::new()));
        registry.register(Arc::new(PlainTextCleaner::new()));
        registry
    }

    /// Enable or disable NFC normalization of cleaned text.
    pub fn with_normalize_unicode(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Register a cleaner for all of its formats.
    pub fn register(&mut self, cleaner: Arc<dyn FormatCleaner>) {
        for format in cleaner.formats() {
            self.cleaners.insert(*format, cleaner.clone());
        }
    }

    /// Get the cleaner for a format, falling back to plain text.
    pub fn get(&self, format: SourceFormat) -> Arc<dyn FormatCleaner> {
        self.cleaners
            .get(&format)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// Check if a format has a dedicated cleaner.
    pub fn supports(&self, format: SourceFormat) -> bool {
        self.cleaners.contains_key(&format)
    }

    /// Clean a source document.
    pub fn clean(&self, source: &SourceDocument) -> CleanedText {
        self.clean_bytes(&source.name, &source.bytes)
    }

    /// Clean raw bytes, dispatching on the file name.
    pub fn clean_bytes(&self, name: &str, data: &[u8]) -> CleanedText {
        let format = crate::detect::detect_format(name, data);
        let cleaner = self.get(format);
        log::debug!("cleaning {} as {} ({})", name, format, cleaner.name());

        let mut cleaned = cleaner.clean(name, data);
        if self.normalize_unicode && !cleaned.text.is_ascii() {
            cleaned.text = cleaned.text.nfc().collect();
        }
        if let Some(ref issue) = cleaned.issue {
            log::warn!("{}: {}", name, issue);
        }
        cleaned
    }
}

impl Default for CleanerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = CleanerRegistry::with_defaults();
        assert!(registry.supports(SourceFormat::Srt));
        assert!(registry.supports(SourceFormat::WebVtt));
        assert!(registry.supports(SourceFormat::Ass));
        assert!(registry.supports(SourceFormat::Docx));
        assert!(registry.supports(SourceFormat::LegacyDoc));
    }

    #[test]
    fn test_empty_registry_falls_back_to_plain_text() {
        let registry = CleanerRegistry::new();
        assert!(!registry.supports(SourceFormat::Srt));
        assert_eq!(registry.get(SourceFormat::Srt).name(), "text");

        let cleaned = registry.clean_bytes("x.srt", b"plain words");
        assert_eq!(cleaned.text, "plain words");
    }

    #[test]
    fn test_unknown_extension_cleaned_as_text() {
        let registry = CleanerRegistry::with_defaults();
        let cleaned = registry.clean_bytes("chapter.md", b"Some <b>markup</b> kept");
        assert_eq!(cleaned.text, "Some <b>markup</b> kept");
        assert_eq!(cleaned.encoding, Some("UTF-8"));
    }

    #[test]
    fn test_nfc_normalization() {
        let registry = CleanerRegistry::with_defaults();
        // "cafe" + combining acute accent
        let cleaned = registry.clean_bytes("a.txt", "cafe\u{0301}".as_bytes());
        assert_eq!(cleaned.text, "caf\u{00E9}");

        let raw = CleanerRegistry::with_defaults().with_normalize_unicode(false);
        let cleaned = raw.clean_bytes("a.txt", "cafe\u{0301}".as_bytes());
        assert_eq!(cleaned.text, "cafe\u{0301}");
    }

    #[test]
    fn test_legacy_doc_reports_unsupported() {
        let registry = CleanerRegistry::with_defaults();
        let cleaned = registry.clean_bytes("old.doc", b"\xD0\xCF\x11\xE0");
        assert!(cleaned.text.is_empty());
        assert!(matches!(cleaned.issue, Some(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_cleaned_text_into_result() {
        assert_eq!(CleanedText::ok("a".into()).into_result().unwrap(), "a");
        let failed = CleanedText::failed(Error::UnsupportedFormat("doc".into()));
        assert!(failed.into_result().is_err());
    }
}
