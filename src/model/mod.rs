//! Data model for the extraction pipeline.
//!
//! Sources come in, tagged tokens flow through the lemmatizer, and a
//! [`Vocabulary`] of unique lemmas comes out.

mod source;
mod token;
mod vocabulary;

pub use source::SourceDocument;
pub use token::{PosCategory, TaggedToken};
pub use vocabulary::Vocabulary;
