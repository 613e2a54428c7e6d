//! Plain-text serialization of a vocabulary.
//!
//! The canonical form is UTF-8 text with one lemma per line. Large lists
//! can be split into fixed-size chunks for packaging.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::Vocabulary;

/// One lemma per line, no trailing newline.
///
/// # Example
/// ```
/// use wordsift::{export, Vocabulary};
///
/// let words: Vocabulary = ["cat", "run"].into_iter().collect();
/// assert_eq!(export::to_text(&words), "cat\nrun");
/// ```
pub fn to_text(words: &Vocabulary) -> String {
    words.words().join("\n")
}

/// Split into groups of at most `size` lemmas, in order.
pub fn chunk(words: &Vocabulary, size: usize) -> Result<Vec<&[String]>> {
    if size == 0 {
        return Err(Error::InvalidOption("chunk size must be at least 1".into()));
    }
    Ok(words.words().chunks(size).collect())
}

/// `<stem>_part<NN>.txt`, numbered from 1 and zero-padded to two digits.
pub fn chunk_file_name(stem: &str, index: usize) -> String {
    format!("{}_part{:02}.txt", stem, index + 1)
}

/// Write `words` to `path` as newline-separated text.
pub fn write_text<P: AsRef<Path>>(words: &Vocabulary, path: P) -> Result<()> {
    fs::write(path, to_text(words))?;
    Ok(())
}

/// Write chunk files named by [`chunk_file_name`] into `dir`.
///
/// Returns the written paths in order.
pub fn write_chunks<P: AsRef<Path>>(
    words: &Vocabulary,
    dir: P,
    stem: &str,
    size: usize,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut paths = Vec::new();
    for (index, part) in chunk(words, size)?.into_iter().enumerate() {
        let path = dir.join(chunk_file_name(stem, index));
        fs::write(&path, part.join("\n"))?;
        paths.push(path);
    }
    log::info!("wrote {} chunks to {}", paths.len(), dir.display());
    Ok(paths)
}
