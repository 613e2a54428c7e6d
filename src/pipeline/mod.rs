//! The extraction pipeline: clean, tokenize, lemmatize, filter, order.
//!
//! One [`Pipeline::run`] processes a batch of sources start to finish on
//! the calling thread. Shared state is limited to the read-only
//! [`Resources`](crate::Resources) handle; everything else is local to
//! the run.

mod observer;
mod options;
mod result;
mod runner;

pub use observer::{NoopObserver, ProgressObserver, Stage};
pub use options::{PipelineOptions, DEFAULT_BATCH_SIZE, DEFAULT_MIN_LENGTH};
pub use result::{ExtractionResult, ExtractionStats, SourceReport};
pub use runner::Pipeline;
