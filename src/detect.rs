//! Source format detection.
//!
//! Dispatch is by file extension (case-insensitive). Unknown extensions
//! are treated as plain text. A few magic-byte checks catch misnamed
//! word-processor files.

use std::path::Path;

/// Format of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// SubRip subtitles (`.srt`)
    Srt,
    /// WebVTT captions (`.vtt`)
    WebVtt,
    /// Advanced SubStation Alpha / SubStation Alpha (`.ass`, `.ssa`)
    Ass,
    /// Office Open XML word-processor document (`.docx`)
    Docx,
    /// Legacy binary Word document (`.doc`), not supported
    LegacyDoc,
    /// Plain text or anything unrecognized
    PlainText,
}

impl SourceFormat {
    /// Short lowercase name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Srt => "srt",
            SourceFormat::WebVtt => "vtt",
            SourceFormat::Ass => "ass",
            SourceFormat::Docx => "docx",
            SourceFormat::LegacyDoc => "doc",
            SourceFormat::PlainText => "text",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// ZIP local file header: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE2 compound document header used by legacy `.doc`
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Detect the format from a file name alone.
///
/// # Example
/// ```
/// use wordsift::detect::{detect_format_from_name, SourceFormat};
///
/// assert_eq!(detect_format_from_name("Episode01.SRT"), SourceFormat::Srt);
/// assert_eq!(detect_format_from_name("notes"), SourceFormat::PlainText);
/// ```
pub fn detect_format_from_name(name: &str) -> SourceFormat {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("srt") => SourceFormat::Srt,
        Some("vtt") => SourceFormat::WebVtt,
        Some("ass") | Some("ssa") => SourceFormat::Ass,
        Some("docx") => SourceFormat::Docx,
        Some("doc") => SourceFormat::LegacyDoc,
        _ => SourceFormat::PlainText,
    }
}

/// Detect the format from a file name, confirming word-processor formats
/// against the leading bytes.
///
/// A `.docx` that is really an OLE file is reported as [`SourceFormat::LegacyDoc`]
/// and a `.doc` that is really a ZIP package as [`SourceFormat::Docx`].
pub fn detect_format(name: &str, data: &[u8]) -> SourceFormat {
    let by_name = detect_format_from_name(name);
    match by_name {
        SourceFormat::Docx if data.starts_with(OLE_MAGIC) => SourceFormat::LegacyDoc,
        SourceFormat::LegacyDoc if is_zip_bytes(data) => SourceFormat::Docx,
        other => other,
    }
}

/// Check if bytes look like a ZIP package.
pub fn is_zip_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}
