//! Lexical database: which lemmas are real words, and under which parts of
//! speech.
//!
//! The on-disk format is the WordNet dictionary layout: `index.noun`,
//! `index.verb`, `index.adj` and `index.adv` list every lemma with its
//! synset count, and `noun.exc`, `verb.exc`, `adj.exc` and `adv.exc` map
//! irregular inflections to their base forms.
//!
//! # Example
//!
//! ```
//! use wordsift::{Lexicon, PosCategory};
//!
//! let lexicon = Lexicon::builder()
//!     .words(PosCategory::Noun, ["cat", "run"])
//!     .words(PosCategory::Verb, ["run"])
//!     .exception(PosCategory::Verb, "ran", "run")
//!     .build();
//!
//! assert!(lexicon.is_valid_word("cat"));
//! assert!(lexicon.contains(PosCategory::Verb, "run"));
//! assert!(!lexicon.is_valid_word("xqzt"));
//! assert_eq!(lexicon.exceptions(PosCategory::Verb, "ran"), ["run"]);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::model::PosCategory;

/// Parts of speech with their WordNet file suffixes, in index order.
const POS_FILES: [(PosCategory, &str); 4] = [
    (PosCategory::Noun, "noun"),
    (PosCategory::Verb, "verb"),
    (PosCategory::Adjective, "adj"),
    (PosCategory::Adverb, "adv"),
];

fn pos_index(pos: PosCategory) -> usize {
    match pos.rule_category() {
        PosCategory::Noun | PosCategory::Unknown => 0,
        PosCategory::Verb => 1,
        PosCategory::Adjective => 2,
        PosCategory::Adverb => 3,
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    /// Bit `pos_index(pos)` is set for each part of speech.
    pos_mask: u8,
    /// Total synsets across parts of speech.
    senses: u32,
}

/// In-memory lexical database.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: FxHashMap<String, Entry>,
    exceptions: [FxHashMap<String, Vec<String>>; 4],
}

impl Lexicon {
    /// Start building a lexicon in memory.
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    /// Load a WordNet `dict/` directory.
    ///
    /// All four `index.*` files are required; missing `*.exc` files are
    /// tolerated.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut lexicon = Lexicon::default();

        for (pos, suffix) in POS_FILES {
            let index_path = dir.join(format!("index.{}", suffix));
            let file = File::open(&index_path).map_err(|e| {
                Error::Lexicon(format!("cannot open {}: {}", index_path.display(), e))
            })?;
            lexicon.read_index(pos, BufReader::new(file))?;

            let exc_path = dir.join(format!("{}.exc", suffix));
            match File::open(&exc_path) {
                Ok(file) => lexicon.read_exceptions(pos, BufReader::new(file))?,
                Err(_) => log::debug!("no exception list at {}", exc_path.display()),
            }
        }

        log::info!(
            "loaded lexicon from {}: {} lemmas, {} exceptions",
            dir.display(),
            lexicon.len(),
            lexicon.exception_count()
        );
        Ok(lexicon)
    }

    /// Read one `index.*` file.
    ///
    /// Lines starting with a space are the licence header and are skipped.
    /// Each entry line begins `lemma pos synset_cnt ...`.
    pub fn read_index<R: BufRead>(&mut self, pos: PosCategory, reader: R) -> Result<()> {
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.starts_with(' ') || line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(lemma), Some(_pos), Some(count)) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(Error::Lexicon(format!(
                    "truncated index line {}: {:?}",
                    line_no + 1,
                    line
                )));
            };
            let senses: u32 = count.parse().map_err(|_| {
                Error::Lexicon(format!(
                    "bad synset count {:?} on index line {}",
                    count,
                    line_no + 1
                ))
            })?;
            self.insert(pos, lemma, senses);
        }
        Ok(())
    }

    /// Read one `*.exc` file: `inflected base [base ...]` per line.
    pub fn read_exceptions<R: BufRead>(&mut self, pos: PosCategory, reader: R) -> Result<()> {
        for line in reader.lines() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(inflected) = fields.next() else {
                continue;
            };
            let bases: Vec<String> = fields.map(normalize_lemma).collect();
            if bases.is_empty() {
                continue;
            }
            self.exceptions[pos_index(pos)]
                .entry(normalize_lemma(inflected))
                .or_default()
                .extend(bases);
        }
        Ok(())
    }

    fn insert(&mut self, pos: PosCategory, lemma: &str, senses: u32) {
        let entry = self.entries.entry(normalize_lemma(lemma)).or_default();
        entry.pos_mask |= 1 << pos_index(pos);
        entry.senses = entry.senses.saturating_add(senses);
    }

    /// Whether `lemma` is listed under `pos` (unknown is treated as noun).
    pub fn contains(&self, pos: PosCategory, lemma: &str) -> bool {
        self.entries
            .get(lemma)
            .is_some_and(|e| e.pos_mask & (1 << pos_index(pos)) != 0)
    }

    /// Whether `lemma` is a real word: at least one recorded sense.
    pub fn is_valid_word(&self, lemma: &str) -> bool {
        self.sense_count(lemma) > 0
    }

    /// Number of senses recorded for `lemma` across all parts of speech.
    pub fn sense_count(&self, lemma: &str) -> u32 {
        self.entries.get(lemma).map(|e| e.senses).unwrap_or(0)
    }

    /// Base forms listed for an irregular inflection.
    pub fn exceptions(&self, pos: PosCategory, form: &str) -> &[String] {
        self.exceptions[pos_index(pos)]
            .get(form)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct lemmas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon has no lemmas.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of inflected forms with exception entries.
    pub fn exception_count(&self) -> usize {
        self.exceptions.iter().map(|m| m.len()).sum()
    }
}

/// Lowercase; WordNet stores multiword lemmas with underscores.
fn normalize_lemma(lemma: &str) -> String {
    lemma.to_lowercase().replace(' ', "_")
}

/// Builder for in-memory lexicons.
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    lexicon: Lexicon,
}

impl LexiconBuilder {
    /// Add a lemma with one sense.
    pub fn word(mut self, pos: PosCategory, lemma: &str) -> Self {
        self.lexicon.insert(pos, lemma, 1);
        self
    }

    /// Add several lemmas with one sense each.
    pub fn words<'a>(mut self, pos: PosCategory, lemmas: impl IntoIterator<Item = &'a str>) -> Self {
        for lemma in lemmas {
            self.lexicon.insert(pos, lemma, 1);
        }
        self
    }

    /// Add a lemma with an explicit sense count (0 records the POS only).
    pub fn senses(mut self, pos: PosCategory, lemma: &str, senses: u32) -> Self {
        self.lexicon.insert(pos, lemma, senses);
        self
    }

    /// Add an irregular inflection.
    pub fn exception(mut self, pos: PosCategory, inflected: &str, base: &str) -> Self {
        self.lexicon.exceptions[pos_index(pos)]
            .entry(normalize_lemma(inflected))
            .or_default()
            .push(normalize_lemma(base));
        self
    }

    /// Finish building.
    pub fn build(self) -> Lexicon {
        self.lexicon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_NOUN: &str = "  1 This software and database is being provided to you, the LICENSEE\n  2 by Princeton University under the following license.\ncat n 8 6 @ ~ #m #p %p + 8 4 02121620 09900153\nrun n 16 5 @ ~ #m + ; 16 3 00189565\n";
    const INDEX_VERB: &str = "run v 41 4 @ ~ * $ 41 20 02075049\n";

    #[test]
    fn test_read_index_skips_header() {
        let mut lexicon = Lexicon::default();
        lexicon
            .read_index(PosCategory::Noun, INDEX_NOUN.as_bytes())
            .unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.sense_count("cat"), 8);
        assert!(lexicon.contains(PosCategory::Noun, "run"));
        assert!(!lexicon.contains(PosCategory::Verb, "run"));
    }

    #[test]
    fn test_senses_accumulate_across_pos() {
        let mut lexicon = Lexicon::default();
        lexicon
            .read_index(PosCategory::Noun, INDEX_NOUN.as_bytes())
            .unwrap();
        lexicon
            .read_index(PosCategory::Verb, INDEX_VERB.as_bytes())
            .unwrap();
        assert_eq!(lexicon.sense_count("run"), 57);
        assert!(lexicon.contains(PosCategory::Verb, "run"));
    }

    #[test]
    fn test_bad_synset_count() {
        let mut lexicon = Lexicon::default();
        let result = lexicon.read_index(PosCategory::Noun, "cat n many\n".as_bytes());
        assert!(matches!(result, Err(Error::Lexicon(_))));
    }

    #[test]
    fn test_truncated_line() {
        let mut lexicon = Lexicon::default();
        let result = lexicon.read_index(PosCategory::Noun, "cat n\n".as_bytes());
        assert!(matches!(result, Err(Error::Lexicon(_))));
    }

    #[test]
    fn test_read_exceptions() {
        let mut lexicon = Lexicon::default();
        lexicon
            .read_exceptions(PosCategory::Verb, "ran run\nwent go\nbeaten beat\n\nodd\n".as_bytes())
            .unwrap();
        assert_eq!(lexicon.exceptions(PosCategory::Verb, "went"), ["go"]);
        assert!(lexicon.exceptions(PosCategory::Noun, "went").is_empty());
        assert_eq!(lexicon.exception_count(), 3);
    }

    #[test]
    fn test_zero_senses_not_valid() {
        let lexicon = Lexicon::builder()
            .senses(PosCategory::Noun, "ghost", 0)
            .build();
        assert!(lexicon.contains(PosCategory::Noun, "ghost"));
        assert!(!lexicon.is_valid_word("ghost"));
    }

    #[test]
    fn test_unknown_pos_treated_as_noun() {
        let lexicon = Lexicon::builder().word(PosCategory::Noun, "cat").build();
        assert!(lexicon.contains(PosCategory::Unknown, "cat"));
    }

    #[test]
    fn test_load_dir_missing_index() {
        let dir = tempfile::tempdir().unwrap();
        let result = Lexicon::load_dir(dir.path());
        assert!(matches!(result, Err(Error::Lexicon(_))));
    }
}
