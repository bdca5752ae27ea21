// src/progress.rs
/// Lightweight progress reporting for the long-running tools (batch, localize).
/// The CLI front ends implement this to surface status on stderr.
pub trait Progress {
    /// Called at the start with the total number of items.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One item (a file, a locale/NPC pair) finished.
    fn item_done(&mut self, _label: &str) {}

    /// One item failed; the run carries on.
    fn item_failed(&mut self, _label: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Records every call; handy for asserting on what a run reported.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub total: Option<usize>,
    pub logs: Vec<String>,
    pub done: Vec<String>,
    pub failed: Vec<(String, String)>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) {
        self.total = Some(total);
    }
    fn log(&mut self, msg: &str) {
        self.logs.push(s!(msg));
    }
    fn item_done(&mut self, label: &str) {
        self.done.push(s!(label));
    }
    fn item_failed(&mut self, label: &str, reason: &str) {
        self.failed.push((s!(label), s!(reason)));
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}
