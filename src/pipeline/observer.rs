//! Progress reporting hook.

/// Pipeline stage a progress event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Decoding and cleaning source files; one step per file.
    Clean,
    /// Lemmatization; one step per batch.
    Lemmatize,
}

/// Receives `(completed, total)` progress events.
///
/// Closures taking `(Stage, usize, usize)` implement this trait.
pub trait ProgressObserver {
    fn on_batch_progress(&self, stage: Stage, completed: usize, total: usize);
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_batch_progress(&self, _stage: Stage, _completed: usize, _total: usize) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(Stage, usize, usize),
{
    fn on_batch_progress(&self, stage: Stage, completed: usize, total: usize) {
        self(stage, completed, total)
    }
}
