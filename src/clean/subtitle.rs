//! Subtitle and caption cleaners (SRT, WebVTT, ASS/SSA).
//!
//! Cue indices and timing lines are removed entirely, inline `<...>` tags
//! and `{...}` override codes are stripped without interpretation, and
//! blank lines and format banners are dropped. Only dialogue survives.

use once_cell::sync::Lazy;
use regex::Regex;

use super::encoding::decode_text;
use super::{CleanedText, FormatCleaner};
use crate::detect::SourceFormat;

/// Timing line: `HH:MM:SS,mmm --> ...` or `MM:SS.mmm --> ...`
static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\d{1,2}:)?\d{1,2}:\d{2}[,.]\d{1,3}\s*-->").expect("valid timestamp regex")
});

/// Numeric cue index line.
static CUE_INDEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*$").expect("valid cue index regex"));

/// Inline markup tag such as `<i>`, `<font color=..>`, `<c.yellow>`, `<00:01.000>`.
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Style override code such as `{\an8}` or `{\i1}`.
static OVERRIDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^}]*\}").expect("valid override regex"));

/// ASS/SSA `Dialogue:` lines carry this many comma-separated fields; the
/// last one is the text and may itself contain commas.
const ASS_DIALOGUE_FIELDS: usize = 10;

/// Strip inline tags and override codes, then trim.
fn strip_markup(line: &str) -> String {
    let without_overrides = OVERRIDE_RE.replace_all(line, "");
    let without_tags = TAG_RE.replace_all(&without_overrides, "");
    without_tags.trim().to_string()
}

fn is_timing_line(line: &str) -> bool {
    TIMESTAMP_RE.is_match(line)
}

fn is_cue_index(line: &str) -> bool {
    CUE_INDEX_RE.is_match(line)
}

/// Decode entities WebVTT permits in cue payloads.
fn decode_vtt_entities(line: &str) -> String {
    line.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&lrm;", "")
        .replace("&rlm;", "")
        .replace("&amp;", "&")
}

fn finish(name: &str, data: &[u8], clean_lines: impl Fn(&str) -> Vec<String>) -> CleanedText {
    let decoded = decode_text(name, data);
    let lines = clean_lines(&decoded.text);
    CleanedText::ok(lines.join("\n"))
        .with_encoding(decoded.encoding)
        .with_issue(decoded.issue)
}

/// SubRip (`.srt`) cleaner.
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtCleaner;

impl SrtCleaner {
    /// Create a new SRT cleaner.
    pub fn new() -> Self {
        Self
    }

    /// Clean decoded SRT text into dialogue lines.
    pub fn clean_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !is_cue_index(line) && !is_timing_line(line))
            .map(strip_markup)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

impl FormatCleaner for SrtCleaner {
    fn formats(&self) -> &[SourceFormat] {
        &[SourceFormat::Srt]
    }

    fn name(&self) -> &str {
        "srt"
    }

    fn clean(&self, name: &str, data: &[u8]) -> CleanedText {
        finish(name, data, Self::clean_lines)
    }
}

/// WebVTT (`.vtt`) cleaner.
///
/// Works block by block: the `WEBVTT` header block and `NOTE`, `STYLE` and
/// `REGION` blocks are dropped, and in a cue block everything up to and
/// including the timing line (i.e. the optional cue identifier) is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebVttCleaner;

impl WebVttCleaner {
    /// Create a new WebVTT cleaner.
    pub fn new() -> Self {
        Self
    }

    /// Clean decoded WebVTT text into dialogue lines.
    pub fn clean_lines(text: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut block: Vec<&str> = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                Self::flush_block(&block, &mut out);
                block.clear();
            } else {
                block.push(line);
            }
        }
        Self::flush_block(&block, &mut out);
        out
    }

    fn flush_block(block: &[&str], out: &mut Vec<String>) {
        let Some(first) = block.first() else {
            return;
        };
        let first = first.trim_start();
        if first.starts_with("WEBVTT")
            || first.starts_with("NOTE")
            || first.starts_with("STYLE")
            || first.starts_with("REGION")
        {
            return;
        }

        let payload_start = block
            .iter()
            .position(|line| is_timing_line(line))
            .map(|i| i + 1)
            .unwrap_or(0);

        for line in &block[payload_start..] {
            let line = line.trim();
            if is_cue_index(line) || is_timing_line(line) {
                continue;
            }
            let cleaned = decode_vtt_entities(&strip_markup(line));
            let cleaned = cleaned.trim();
            if !cleaned.is_empty() {
                out.push(cleaned.to_string());
            }
        }
    }
}

impl FormatCleaner for WebVttCleaner {
    fn formats(&self) -> &[SourceFormat] {
        &[SourceFormat::WebVtt]
    }

    fn name(&self) -> &str {
        "vtt"
    }

    fn clean(&self, name: &str, data: &[u8]) -> CleanedText {
        finish(name, data, Self::clean_lines)
    }
}

/// Advanced SubStation Alpha / SubStation Alpha (`.ass`, `.ssa`) cleaner.
///
/// Only `Dialogue:` events are kept; section banners, `Format:` and
/// `Style:` lines, and `Comment:` events are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssCleaner;

impl AssCleaner {
    /// Create a new ASS/SSA cleaner.
    pub fn new() -> Self {
        Self
    }

    /// Clean decoded ASS/SSA text into dialogue lines.
    pub fn clean_lines(text: &str) -> Vec<String> {
        text.lines()
            .filter_map(|line| line.trim().strip_prefix("Dialogue:"))
            .filter_map(Self::dialogue_text)
            .collect()
    }

    /// Extract the trailing text field of a `Dialogue:` event body.
    fn dialogue_text(fields: &str) -> Option<String> {
        let parts: Vec<&str> = fields.splitn(ASS_DIALOGUE_FIELDS, ',').collect();
        if parts.len() < ASS_DIALOGUE_FIELDS {
            return None;
        }
        let text = parts[ASS_DIALOGUE_FIELDS - 1]
            .replace("\\N", " ")
            .replace("\\n", " ")
            .replace("\\h", " ");
        let cleaned = strip_markup(&text);
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }
}

impl FormatCleaner for AssCleaner {
    fn formats(&self) -> &[SourceFormat] {
        &[SourceFormat::Ass]
    }

    fn name(&self) -> &str {
        "ass"
    }

    fn clean(&self, name: &str, data: &[u8]) -> CleanedText {
        finish(name, data, Self::clean_lines)
    }
}
