// src/progress.rs
/// Lightweight progress reporting for the per-item fetch loops.
/// Frontends implement this to surface status; extractors never depend on it.
pub trait Progress {
    /// Called at the start with the total number of items.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one item (page, link) completes, successfully or skipped.
    fn item_done(&mut self, _label: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Records every callback; handy for asserting what the loops report.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub total: Option<usize>,
    pub done: Vec<String>,
    pub messages: Vec<String>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) {
        self.total = Some(total);
    }
    fn log(&mut self, msg: &str) {
        self.messages.push(s!(msg));
    }
    fn item_done(&mut self, label: &str) {
        self.done.push(s!(label));
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}
