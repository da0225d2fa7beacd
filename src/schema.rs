//! Declared column schemas for output tables
//!
//! Each output table has a fixed column list decided up front. Rows are checked
//! against it before anything is written, so a document with a different shape
//! fails loudly instead of shifting columns.

use crate::activity::{DailyMetric, IntradayActivity};
use crate::error::TabulateError;
use serde_json::{Map, Value};

pub const START_TIME: &str = "startTime";
pub const END_TIME: &str = "endTime";
pub const RESTING_HEART_RATE: &str = "restingHeartRate";

/// One output row, keyed by column name
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<String>,
}

impl ColumnSchema {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// `startTime, <activity>[, endTime]`
    pub fn intraday(activity: IntradayActivity) -> Self {
        let mut columns = vec![START_TIME, activity.as_str()];
        if activity.has_end_time() {
            columns.push(END_TIME);
        }
        Self::new(columns)
    }

    pub fn resting_heart() -> Self {
        Self::new([START_TIME, RESTING_HEART_RATE])
    }

    pub fn daily(metric: DailyMetric) -> Self {
        Self::new([START_TIME, metric.as_str()])
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Check that `row` has exactly this schema's columns
    pub fn check_row(&self, index: usize, row: &Row) -> Result<(), TabulateError> {
        let matches = row.len() == self.columns.len()
            && self.columns.iter().all(|c| row.contains_key(c));
        if matches {
            Ok(())
        } else {
            Err(TabulateError::SchemaMismatch {
                row: index,
                expected: self.columns.clone(),
                actual: row.keys().cloned().collect(),
            })
        }
    }

    pub fn check_rows(&self, rows: &[Row]) -> Result<(), TabulateError> {
        rows.iter()
            .enumerate()
            .try_for_each(|(i, row)| self.check_row(i, row))
    }
}
