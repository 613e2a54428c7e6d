//! Block lists: named presets and the per-run filter set.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};

/// Split a raw word list on whitespace and commas, lowercasing each entry.
///
/// # Example
/// ```
/// use wordsift::filter::parse_word_list;
///
/// assert_eq!(parse_word_list("Cat, dog\nBIRD,,"), vec!["cat", "dog", "bird"]);
/// ```
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Union of preset and custom block lists, compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    words: FxHashSet<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add words (lowercased).
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    /// Builder-style [`extend`](Self::extend).
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(words);
        self
    }

    /// Whether a lowercase lemma is blocked.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Named, pre-shipped block lists (one per proficiency tier).
#[derive(Debug, Clone, Default)]
pub struct PresetLibrary {
    presets: BTreeMap<String, Vec<String>>,
}

impl PresetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every `*.txt` file in `dir`, keyed by lowercase file stem.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut library = Self::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_txt = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
            if !path.is_file() || !is_txt {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let text = fs::read_to_string(&path)?;
            library.register(stem, parse_word_list(&text));
        }
        log::info!("loaded {} presets from {}", library.len(), dir.display());
        Ok(library)
    }

    /// Register (or replace) a preset.
    pub fn register<I, S>(&mut self, name: &str, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        self.presets.insert(name.to_lowercase(), words);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_preset<I, S>(mut self, name: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.register(name, words);
        self
    }

    /// Words of a preset.
    pub fn get(&self, name: &str) -> Result<&[String]> {
        self.presets
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownPreset(name.to_string()))
    }

    /// Preset names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Union the named presets and a custom list into a [`FilterSet`].
    ///
    /// Unknown preset names are skipped and returned as errors next to the
    /// set.
    pub fn build_filter_set<S: AsRef<str>>(
        &self,
        presets: &[S],
        custom: &[String],
    ) -> (FilterSet, Vec<Error>) {
        let mut set = FilterSet::new();
        let mut missing = Vec::new();
        for name in presets {
            match self.get(name.as_ref()) {
                Ok(words) => set.extend(words),
                Err(e) => {
                    log::warn!("{}", e);
                    missing.push(e);
                }
            }
        }
        set.extend(custom);
        (set, missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> PresetLibrary {
        PresetLibrary::new()
            .with_preset("CET4", ["Apple", "banana"])
            .with_preset("basic", ["cat", "dog"])
    }

    #[test]
    fn test_parse_word_list() {
        assert_eq!(parse_word_list(" a,b\tC\r\n\n d "), vec!["a", "b", "c", "d"]);
        assert!(parse_word_list(", ,\n").is_empty());
    }

    #[test]
    fn test_filter_set_case_insensitive() {
        let set = FilterSet::new().with_words(["Cat", "DOG"]);
        assert!(set.contains("cat"));
        assert!(set.contains("dog"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_union_order_independent() {
        let lib = library();
        let custom = vec!["Zebra".to_string()];
        let (a, _) = lib.build_filter_set(&["cet4", "basic"], &custom);
        let (b, _) = lib.build_filter_set(&["basic", "CET4"], &custom);
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        assert!(a.contains("apple"));
        assert!(a.contains("zebra"));
    }

    #[test]
    fn test_unknown_preset_skipped() {
        let lib = library();
        let (set, missing) = lib.build_filter_set(&["basic", "ielts"], &[]);
        assert_eq!(set.len(), 2);
        assert_eq!(missing.len(), 1);
        assert!(matches!(&missing[0], Error::UnknownPreset(name) if name == "ielts"));
    }

    #[test]
    fn test_names_sorted() {
        let presets = library();
        let names: Vec<&str> = presets.names().collect();
        assert_eq!(names, vec!["basic", "cet4"]);
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CET6.txt"), "Abandon, ability\nabroad").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        let lib = PresetLibrary::load_dir(dir.path()).unwrap();
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.get("cet6").unwrap(), ["abandon", "ability", "abroad"]);
    }
}
