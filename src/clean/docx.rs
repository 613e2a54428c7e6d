//! DOCX (WordprocessingML) cleaner.
//!
//! A `.docx` is a ZIP package; the body lives in `word/document.xml`.
//! Paragraph text and table-cell text are emitted in document order, one
//! line each. Drawings, field codes, deleted runs and everything else that
//! is not a `w:t` run are ignored.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::{CleanedText, FormatCleaner};
use crate::detect::SourceFormat;
use crate::error::{Error, Result};

const DOCUMENT_PART: &str = "word/document.xml";

/// Word-processor document cleaner.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxCleaner;

impl DocxCleaner {
    /// Create a new DOCX cleaner.
    pub fn new() -> Self {
        Self
    }

    /// Extract body text from the package bytes.
    pub fn extract(data: &[u8]) -> Result<String> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let mut part = archive.by_name(DOCUMENT_PART)?;
        let mut xml = String::new();
        part.read_to_string(&mut xml)?;
        Ok(body_lines(&xml)?.join("\n"))
    }
}

impl FormatCleaner for DocxCleaner {
    fn formats(&self) -> &[SourceFormat] {
        &[SourceFormat::Docx]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn clean(&self, name: &str, data: &[u8]) -> CleanedText {
        match Self::extract(data) {
            Ok(text) => CleanedText::ok(text).with_encoding("UTF-8"),
            Err(e) => CleanedText::failed(Error::decode(name, e.to_string())),
        }
    }
}

/// Walk state for `word/document.xml`.
#[derive(Default)]
struct BodyWalk {
    lines: Vec<String>,
    /// Open paragraphs; text boxes nest paragraphs inside runs.
    paragraphs: Vec<String>,
    /// Open table cells, each collecting its paragraphs.
    cells: Vec<Vec<String>>,
    in_text: bool,
}

impl BodyWalk {
    fn push_text(&mut self, text: &str) {
        if let Some(paragraph) = self.paragraphs.last_mut() {
            paragraph.push_str(text);
        }
    }

    fn end_paragraph(&mut self) {
        let Some(paragraph) = self.paragraphs.pop() else {
            return;
        };
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            return;
        }
        match self.cells.last_mut() {
            Some(cell) => cell.push(paragraph.to_string()),
            None => self.lines.push(paragraph.to_string()),
        }
    }

    fn end_cell(&mut self) {
        if let Some(cell) = self.cells.pop() {
            if !cell.is_empty() {
                self.lines.push(cell.join("\n"));
            }
        }
    }
}

fn body_lines(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut walk = BodyWalk::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => walk.paragraphs.push(String::new()),
                b"w:tc" => walk.cells.push(Vec::new()),
                b"w:t" => walk.in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => walk.push_text("\t"),
                b"w:br" | b"w:cr" => walk.push_text(" "),
                _ => {}
            },
            Event::Text(t) if walk.in_text => {
                let text = t.unescape()?;
                walk.push_text(&text);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => walk.in_text = false,
                b"w:p" => walk.end_paragraph(),
                b"w:tc" => walk.end_cell(),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(walk.lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn package(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn wrap(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    #[test]
    fn test_paragraphs_in_order() {
        let xml = wrap(
            r#"<w:p><w:r><w:t>First</w:t></w:r><w:r><w:t xml:space="preserve"> paragraph</w:t></w:r></w:p><w:p><w:r><w:t>Second</w:t></w:r></w:p>"#,
        );
        let text = DocxCleaner::extract(&package(&xml)).unwrap();
        assert_eq!(text, "First paragraph\nSecond");
    }

    #[test]
    fn test_table_cells_flattened_in_document_order() {
        let xml = wrap(
            r#"<w:p><w:r><w:t>Before</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell one</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Cell two</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>After</w:t></w:r></w:p>"#,
        );
        let text = DocxCleaner::extract(&package(&xml)).unwrap();
        assert_eq!(text, "Before\nCell one\nCell two\nAfter");
    }

    #[test]
    fn test_ignores_non_text_content() {
        let xml = wrap(
            r#"<w:p><w:r><w:instrText>PAGE</w:instrText></w:r><w:r><w:drawing/></w:r><w:r><w:t>Caption &amp; text</w:t></w:r></w:p><w:p></w:p>"#,
        );
        let text = DocxCleaner::extract(&package(&xml)).unwrap();
        assert_eq!(text, "Caption & text");
    }

    #[test]
    fn test_not_a_zip_reports_decode_error() {
        let cleaned = DocxCleaner::new().clean("broken.docx", b"not a zip at all");
        assert!(cleaned.text.is_empty());
        assert!(matches!(cleaned.issue, Some(Error::Decode { .. })));
    }

    #[test]
    fn test_missing_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        let data = writer.finish().unwrap().into_inner();

        assert!(DocxCleaner::extract(&data).is_err());
    }
}
