//! Source document input.

use std::path::Path;

use crate::detect::{detect_format, SourceFormat};
use crate::error::Result;

/// A named blob of source bytes (subtitle, document, or text file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// File name, used for format dispatch and reporting
    pub name: String,

    /// Raw file content
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    /// Create a source from a name and its bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Create a source from in-memory text.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, text.as_bytes().to_vec())
    }

    /// Read a source from disk, keeping only the file name.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    /// Detected format of this source.
    pub fn format(&self) -> SourceFormat {
        detect_format(&self.name, &self.bytes)
    }

    /// Size of the raw content in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the source has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let source = SourceDocument::from_text("notes.txt", "hello");
        assert_eq!(source.name, "notes.txt");
        assert_eq!(source.bytes, b"hello");
        assert_eq!(source.format(), SourceFormat::PlainText);
    }

    #[test]
    fn test_read_keeps_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Episode.srt");
        std::fs::write(&path, "1\n").unwrap();

        let source = SourceDocument::read(&path).unwrap();
        assert_eq!(source.name, "Episode.srt");
        assert_eq!(source.format(), SourceFormat::Srt);
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_read_missing_file() {
        let result = SourceDocument::read("/nonexistent/path/file.txt");
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
