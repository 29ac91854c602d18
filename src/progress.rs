// src/progress.rs
use std::path::Path;

/// Lightweight progress reporting used by the merge step.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of configured sources.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One source was read and normalized.
    fn source_done(&mut self, _path: &Path, _rows: usize) {}

    /// One source was skipped (file missing).
    fn source_skipped(&mut self, _path: &Path) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
