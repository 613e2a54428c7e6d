//! Character encoding detection and decoding.
//!
//! Detection priority:
//! 1. BOM (Byte Order Mark)
//! 2. UTF-16 without BOM, from the NUL-byte pattern of ASCII text
//! 3. Strict UTF-8 validation
//! 4. chardetng statistical guess, used only when confident
//!
//! Anything else falls back to lossy UTF-8 with U+FFFD substitution and
//! reports a [`Error::Decode`](crate::Error::Decode).

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

use crate::error::Error;

/// Result of decoding a byte buffer.
#[derive(Debug)]
pub struct Decoded {
    /// Decoded text
    pub text: String,

    /// Name of the encoding used (e.g. "UTF-8", "windows-1252")
    pub encoding: &'static str,

    /// Set when the text came from the lossy fallback
    pub issue: Option<Error>,
}

impl Decoded {
    fn clean(text: String, encoding: &'static Encoding) -> Self {
        Self {
            text,
            encoding: encoding.name(),
            issue: None,
        }
    }

    /// Whether the lossy fallback was needed.
    pub fn is_lossy(&self) -> bool {
        self.issue.is_some()
    }
}

/// Decode source bytes to text. Never fails.
///
/// `name` only labels the [`Error::Decode`] raised on fallback.
pub fn decode_text(name: &str, data: &[u8]) -> Decoded {
    if data.is_empty() {
        return Decoded::clean(String::new(), UTF_8);
    }

    if let Some((encoding, bom_len)) = Encoding::for_bom(data) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&data[bom_len..]);
        if !had_errors {
            return Decoded::clean(text.into_owned(), encoding);
        }
        return lossy_fallback(
            name,
            data,
            format!("malformed {} after byte order mark", encoding.name()),
        );
    }

    // Interleaved NULs are valid UTF-8, so this must run first.
    if let Some(encoding) = detect_utf16_without_bom(data) {
        let (text, had_errors) = encoding.decode_without_bom_handling(data);
        if !had_errors {
            return Decoded::clean(text.into_owned(), encoding);
        }
        return lossy_fallback(
            name,
            data,
            format!("malformed {} without byte order mark", encoding.name()),
        );
    }

    if let Ok(text) = std::str::from_utf8(data) {
        return Decoded::clean(text.to_string(), UTF_8);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let (encoding, confident) = detector.guess_assess(None, false);
    log::debug!(
        "{}: charset guess {} (confident: {})",
        name,
        encoding.name(),
        confident
    );

    if confident {
        let (text, had_errors) = encoding.decode_without_bom_handling(data);
        if !had_errors {
            return Decoded::clean(text.into_owned(), encoding);
        }
        return lossy_fallback(
            name,
            data,
            format!("bytes invalid in guessed charset {}", encoding.name()),
        );
    }

    lossy_fallback(
        name,
        data,
        format!("low-confidence charset guess ({})", encoding.name()),
    )
}

/// Mostly-ASCII UTF-16 has a NUL in every other byte: odd positions for
/// little-endian, even positions for big-endian.
fn detect_utf16_without_bom(data: &[u8]) -> Option<&'static Encoding> {
    let pairs = data.len() / 2;
    if pairs <= 4 {
        return None;
    }

    let nulls_at_even = data.iter().step_by(2).filter(|&&b| b == 0).count();
    let nulls_at_odd = data.iter().skip(1).step_by(2).filter(|&&b| b == 0).count();

    if nulls_at_odd > pairs * 3 / 4 && nulls_at_even < pairs / 4 {
        Some(UTF_16LE)
    } else if nulls_at_even > pairs * 3 / 4 && nulls_at_odd < pairs / 4 {
        Some(UTF_16BE)
    } else {
        None
    }
}

fn lossy_fallback(name: &str, data: &[u8], reason: String) -> Decoded {
    Decoded {
        text: String::from_utf8_lossy(data).into_owned(),
        encoding: UTF_8.name(),
        issue: Some(Error::decode(name, reason)),
    }
}
