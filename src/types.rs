//! Report types returned by the transforms
//!
//! Each transform returns a summary of what it wrote so callers (and the CLI's
//! `--json` output) can inspect a run without re-reading the CSV files.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Summary of one output table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    /// Activity or metric name the table holds
    pub table: String,
    pub output: PathBuf,
    /// Input files that contributed rows
    pub files: usize,
    pub rows: usize,
}

/// Why a resting heart entry was left out of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingDate,
    InvalidDate,
    MissingValue,
    MissingRestingHeartRate,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::MissingDate => "missing_date",
            SkipReason::InvalidDate => "invalid_date",
            SkipReason::MissingValue => "missing_value",
            SkipReason::MissingRestingHeartRate => "missing_resting_heart_rate",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestingHeartReport {
    #[serde(flatten)]
    pub table: TableReport,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl RestingHeartReport {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Everything one invocation produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resting_heart: Option<RestingHeartReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub intraday: Vec<TableReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub daily: Vec<TableReport>,
}

impl RunReport {
    pub fn total_rows(&self) -> usize {
        self.resting_heart.as_ref().map_or(0, |r| r.table.rows)
            + self.intraday.iter().map(|t| t.rows).sum::<usize>()
            + self.daily.iter().map(|t| t.rows).sum::<usize>()
    }
}
