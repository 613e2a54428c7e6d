//! Filtering and deduplication of validated lemmas.
//!
//! The per-run [`FilterSet`] is the union of zero or more presets from a
//! [`PresetLibrary`] and an optional custom list. [`FilterEngine`] applies
//! it together with the minimum length and the stopword list.

mod engine;
mod filter_set;
mod stopwords;

pub use engine::{FilterEngine, Rejection};
pub use filter_set::{parse_word_list, FilterSet, PresetLibrary};
pub use stopwords::StopwordFilter;
