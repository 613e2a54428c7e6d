//! Plain-text and unsupported-format cleaners.

use super::encoding::decode_text;
use super::{CleanedText, FormatCleaner};
use crate::detect::SourceFormat;
use crate::error::Error;

/// Plain-text cleaner; also the fallback for unknown extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextCleaner;

impl PlainTextCleaner {
    /// Create a new plain-text cleaner.
    pub fn new() -> Self {
        Self
    }
}

impl FormatCleaner for PlainTextCleaner {
    fn formats(&self) -> &[SourceFormat] {
        &[SourceFormat::PlainText]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn clean(&self, name: &str, data: &[u8]) -> CleanedText {
        let decoded = decode_text(name, data);
        CleanedText::ok(decoded.text)
            .with_encoding(decoded.encoding)
            .with_issue(decoded.issue)
    }
}

/// Legacy binary `.doc` documents are not supported: no text, one report.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyDocCleaner;

impl LegacyDocCleaner {
    /// Create a new legacy document cleaner.
    pub fn new() -> Self {
        Self
    }
}

impl FormatCleaner for LegacyDocCleaner {
    fn formats(&self) -> &[SourceFormat] {
        &[SourceFormat::LegacyDoc]
    }

    fn name(&self) -> &str {
        "doc"
    }

    fn clean(&self, name: &str, _data: &[u8]) -> CleanedText {
        CleanedText::failed(Error::UnsupportedFormat(format!(
            "{}: legacy binary Word document (save as .docx)",
            name
        )))
    }
}
