//! Error types for wordsift library.

use std::io;
use thiserror::Error;

/// Result type alias for wordsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting vocabulary.
///
/// The first four variants are the recoverable per-run conditions: the
/// pipeline records them on its result instead of returning them.
#[derive(Error, Debug)]
pub enum Error {
    /// Source bytes could not be confidently decoded; fallback text was used.
    #[error("Decode error in {name}: {reason}")]
    Decode { name: String, reason: String },

    /// The source format is not supported (e.g. legacy binary `.doc`).
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The requested lemmatizer backend has no model loaded.
    #[error("Lemmatizer backend unavailable: {0}")]
    BackendUnavailable(String),

    /// No usable text across all sources.
    #[error("No usable text in any source")]
    EmptyInput,

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The lexical database is missing or malformed.
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// A tagger or lemmatizer model could not be loaded or applied.
    #[error("Model error: {0}")]
    Model(String),

    /// A preset block list name is not registered.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// A configuration value is out of range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a decode error for the named source.
    pub fn decode(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Decode {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether the pipeline recovers from this error on its own.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Decode { .. }
                | Error::UnsupportedFormat(_)
                | Error::BackendUnavailable(_)
                | Error::EmptyInput
                | Error::UnknownPreset(_)
        )
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Other(format!("ZIP error: {}", err)),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Other(format!("XML error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyInput;
        assert_eq!(err.to_string(), "No usable text in any source");

        let err = Error::decode("movie.srt", "low-confidence charset guess");
        assert_eq!(
            err.to_string(),
            "Decode error in movie.srt: low-confidence charset guess"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::UnsupportedFormat("doc".into()).is_recoverable());
        assert!(Error::BackendUnavailable("accurate".into()).is_recoverable());
        assert!(!Error::Lexicon("missing index.noun".into()).is_recoverable());
        assert!(!Error::InvalidOption("min_length".into()).is_recoverable());
    }
}
