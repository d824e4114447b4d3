use std::sync::Arc;

/// Emitted after each batch resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Targets with a recorded outcome so far.
    pub done: usize,
    pub total: usize,
}

/// Observer for run progress. Called from the driving task, never concurrently.
pub type ProgressSink = Arc<dyn Fn(ProgressEvent) + Send + Sync>;
