//! Per-file progress reporting

use tracing::debug;

/// Receives a notification after each input file is written out
pub trait ProgressObserver {
    /// `index` is 1-based
    fn on_file(&mut self, table: &str, index: usize, total: usize);

    /// Called once a table has no more files to process
    fn on_table_done(&mut self, _table: &str) {}
}

/// Logs progress at debug level
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_file(&mut self, table: &str, index: usize, total: usize) {
        debug!(table, index, total, "processed file");
    }
}

/// Collects `(table, index, total)` for every processed file
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub events: Vec<(String, usize, usize)>,
}

impl ProgressObserver for RecordingProgress {
    fn on_file(&mut self, table: &str, index: usize, total: usize) {
        self.events.push((table.to_string(), index, total));
    }
}
