//! Local library of saved vocabulary lists.
//!
//! A library is a directory holding one text file per list plus an
//! `info.json` index mapping each file name to its title, description and
//! save date.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::export;
use crate::model::Vocabulary;

const INFO_FILE: &str = "info.json";

/// Metadata stored for one saved list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub title: String,
    pub desc: String,
    /// `YYYY-MM-DD`, local time
    pub date: String,
}

/// A directory of saved lists.
#[derive(Debug, Clone)]
pub struct Library {
    dir: PathBuf,
    info: BTreeMap<String, LibraryEntry>,
}

impl Library {
    /// Open (creating if needed) a library directory.
    ///
    /// A missing or unreadable `info.json` starts an empty index.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let info_path = dir.join(INFO_FILE);
        let info = match fs::read_to_string(&info_path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("ignoring malformed {}: {}", info_path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Ok(Self { dir, info })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save `words` under `filename` and record its metadata.
    ///
    /// An existing list with the same name is overwritten.
    pub fn save(
        &mut self,
        filename: &str,
        words: &Vocabulary,
        title: &str,
        desc: &str,
    ) -> Result<PathBuf> {
        check_file_name(filename)?;
        let path = self.dir.join(filename);
        export::write_text(words, &path)?;

        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        self.info.insert(
            filename.to_string(),
            LibraryEntry {
                title: title.to_string(),
                desc: desc.to_string(),
                date,
            },
        );
        self.write_info()?;
        log::info!("saved {} words to {}", words.len(), path.display());
        Ok(path)
    }

    /// Saved lists, sorted by file name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &LibraryEntry)> {
        self.info.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Metadata for one list.
    pub fn get(&self, filename: &str) -> Option<&LibraryEntry> {
        self.info.get(filename)
    }

    /// Read a saved list back.
    pub fn load(&self, filename: &str) -> Result<Vocabulary> {
        check_file_name(filename)?;
        let text = fs::read_to_string(self.dir.join(filename))?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect())
    }

    pub fn len(&self) -> usize {
        self.info.len()
    }

    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }

    fn write_info(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.info)?;
        fs::write(self.dir.join(INFO_FILE), json)?;
        Ok(())
    }
}

/// A bare file name inside the library, not the index itself.
fn check_file_name(filename: &str) -> Result<()> {
    let bare = Path::new(filename).file_name().and_then(|n| n.to_str()) == Some(filename);
    if filename.is_empty() || !bare || filename == INFO_FILE || filename.starts_with('.') {
        return Err(Error::InvalidOption(format!(
            "invalid library file name: {:?}",
            filename
        )));
    }
    Ok(())
}
