//! Transform configuration
//!
//! Every transform receives a [`TransformConfig`] instead of reading global
//! defaults, so tests can point it at temporary directories.

use crate::activity::{DailyMetric, IntradayActivity};
use crate::error::TabulateError;
use crate::flatten::DEFAULT_DELIMITER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INTRADAY_DIR: &str = "data-import/intraday/";
pub const DEFAULT_DAY_DIR: &str = "data-import/day/";
pub const DEFAULT_PREAMBLE_LINES: usize = 16;
pub const DEFAULT_RESTING_HEART_FILE: &str = "heart.json";

/// How the non-JSON banner at the top of each export file is skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreambleMode {
    /// Discard exactly this many lines
    Lines(usize),
    /// Discard lines until one starts a JSON object or array
    Detect,
}

impl Default for PreambleMode {
    fn default() -> Self {
        PreambleMode::Lines(DEFAULT_PREAMBLE_LINES)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Root of the intraday export (`<root>/<activity>/*.json`)
    pub intraday_dir: PathBuf,
    /// Root of the daily export (`<root>/*.json`)
    pub day_dir: PathBuf,
    pub intraday_activities: Vec<IntradayActivity>,
    pub daily_metrics: Vec<DailyMetric>,
    pub preamble: PreambleMode,
    /// Separator used when flattening nested keys
    pub delimiter: String,
    /// Extension of export files, without the dot
    pub extension: String,
    /// File in `day_dir` holding the daily heart summaries
    pub resting_heart_file: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            intraday_dir: PathBuf::from(DEFAULT_INTRADAY_DIR),
            day_dir: PathBuf::from(DEFAULT_DAY_DIR),
            intraday_activities: IntradayActivity::ALL.to_vec(),
            daily_metrics: DailyMetric::ALL.to_vec(),
            preamble: PreambleMode::default(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            extension: "json".to_string(),
            resting_heart_file: DEFAULT_RESTING_HEART_FILE.to_string(),
        }
    }
}

impl TransformConfig {
    /// Load a configuration file; absent fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, TabulateError> {
        let content = fs::read_to_string(path).map_err(|e| TabulateError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| TabulateError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_intraday_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.intraday_dir = dir.into();
        self
    }

    pub fn with_day_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.day_dir = dir.into();
        self
    }

    pub fn with_intraday_activities(mut self, activities: Vec<IntradayActivity>) -> Self {
        self.intraday_activities = activities;
        self
    }

    pub fn with_daily_metrics(mut self, metrics: Vec<DailyMetric>) -> Self {
        self.daily_metrics = metrics;
        self
    }

    pub fn with_preamble(mut self, preamble: PreambleMode) -> Self {
        self.preamble = preamble;
        self
    }

    pub fn resting_heart_path(&self) -> PathBuf {
        self.day_dir.join(&self.resting_heart_file)
    }
}
