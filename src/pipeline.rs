//! Pipeline orchestration
//!
//! This module provides the public entry point for fitbit-tabulate. A
//! [`Tabulator`] owns the configuration and runs the individual transforms:
//! resting heart rate, intraday activities and daily metrics.

use crate::config::TransformConfig;
use crate::daily;
use crate::error::TabulateError;
use crate::intraday;
use crate::progress::{LogProgress, ProgressObserver};
use crate::resting_heart;
use crate::types::{RestingHeartReport, RunReport, TableReport};
use tracing::info;

/// Which transforms a run executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub resting_heart: bool,
    pub intraday: bool,
    pub daily: bool,
}

impl Selection {
    /// Resting heart rate followed by intraday tables
    pub const DEFAULT: Selection = Selection {
        resting_heart: true,
        intraday: true,
        daily: false,
    };

    pub const ALL: Selection = Selection {
        resting_heart: true,
        intraday: true,
        daily: true,
    };
}

impl Default for Selection {
    fn default() -> Self {
        Selection::DEFAULT
    }
}

/// Runs transforms against one export layout.
///
/// ```ignore
/// let config = TransformConfig::default().with_day_dir("export/day");
/// let report = Tabulator::new(config).run_default()?;
/// println!("{} rows written", report.total_rows());
/// ```
pub struct Tabulator {
    config: TransformConfig,
    progress: Box<dyn ProgressObserver>,
}

impl Default for Tabulator {
    fn default() -> Self {
        Self::new(TransformConfig::default())
    }
}

impl Tabulator {
    /// Create a tabulator that logs progress through `tracing`
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            progress: Box::new(LogProgress),
        }
    }

    /// Replace the progress observer
    pub fn with_progress(mut self, progress: Box<dyn ProgressObserver>) -> Self {
        self.progress = progress;
        self
    }

    pub fn resting_heart(&mut self) -> Result<RestingHeartReport, TabulateError> {
        resting_heart::run(&self.config)
    }

    pub fn intraday(&mut self) -> Result<Vec<TableReport>, TabulateError> {
        intraday::run(&self.config, self.progress.as_mut())
    }

    pub fn daily(&mut self) -> Result<Vec<TableReport>, TabulateError> {
        daily::run(&self.config, self.progress.as_mut())
    }

    /// Run the selected transforms in order: resting heart, intraday, daily.
    /// The first failure stops the run.
    pub fn run(&mut self, selection: Selection) -> Result<RunReport, TabulateError> {
        let mut report = RunReport::default();

        if selection.resting_heart {
            report.resting_heart = Some(self.resting_heart()?);
        }
        if selection.intraday {
            report.intraday = self.intraday()?;
        }
        if selection.daily {
            report.daily = self.daily()?;
        }

        info!(rows = report.total_rows(), "run complete");
        Ok(report)
    }

    pub fn run_default(&mut self) -> Result<RunReport, TabulateError> {
        self.run(Selection::DEFAULT)
    }
}
