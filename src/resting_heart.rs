//! Daily resting heart rate transform
//!
//! Reads the daily heart summary export and writes one
//! `startTime, restingHeartRate` row per day to `restingHeart.csv`. Days whose
//! summary has no resting heart rate are skipped and counted by reason.

use crate::config::TransformConfig;
use crate::csv_writer::{write_rows, WriteMode};
use crate::document::ExportDocument;
use crate::error::TabulateError;
use crate::schema::{ColumnSchema, Row, RESTING_HEART_RATE, START_TIME};
use crate::types::{RestingHeartReport, SkipReason, TableReport};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{info, warn};

pub const OUTPUT_FILE: &str = "restingHeart.csv";
const SUMMARY_KEY: &str = "activities-heart";

/// Result of extracting one day summary entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Extracted(Row),
    Skipped {
        index: usize,
        date: Option<String>,
        reason: SkipReason,
    },
}

/// Extract `dateTime` and `value.restingHeartRate` from one summary entry
pub fn extract_entry(index: usize, entry: &Value) -> EntryOutcome {
    let skipped = |date: Option<&str>, reason| EntryOutcome::Skipped {
        index,
        date: date.map(str::to_string),
        reason,
    };

    let Some(date) = entry.get("dateTime") else {
        return skipped(None, SkipReason::MissingDate);
    };
    let Some(date) = date.as_str() else {
        return skipped(None, SkipReason::InvalidDate);
    };
    let Some(value) = entry.get("value") else {
        return skipped(Some(date), SkipReason::MissingValue);
    };
    let Some(rate) = value.get(RESTING_HEART_RATE) else {
        return skipped(Some(date), SkipReason::MissingRestingHeartRate);
    };

    let mut row = Row::new();
    row.insert(START_TIME.to_string(), Value::String(date.to_string()));
    row.insert(RESTING_HEART_RATE.to_string(), rate.clone());
    EntryOutcome::Extracted(row)
}

/// Read the heart summary file and write `restingHeart.csv` next to it
pub fn run(config: &TransformConfig) -> Result<RestingHeartReport, TabulateError> {
    let input = config.resting_heart_path();
    let output = config.day_dir.join(OUTPUT_FILE);
    info!(input = %input.display(), "tabulating resting heart rate");

    let document = ExportDocument::load(&input, config)?;
    let entries = document.array(SUMMARY_KEY)?;

    let mut rows = Vec::with_capacity(entries.len());
    let mut skipped: BTreeMap<SkipReason, usize> = BTreeMap::new();
    for (i, entry) in entries.iter().enumerate() {
        match extract_entry(i, entry) {
            EntryOutcome::Extracted(row) => rows.push(row),
            EntryOutcome::Skipped {
                index,
                date,
                reason,
            } => {
                warn!(index, date = date.as_deref().unwrap_or("unknown"), %reason, "skipping heart summary entry");
                *skipped.entry(reason).or_default() += 1;
            }
        }
    }

    if rows.is_empty() {
        return Err(TabulateError::NoRestingHeartEntries { path: input });
    }

    let written = write_rows(
        &output,
        &ColumnSchema::resting_heart(),
        &rows,
        WriteMode::Truncate,
        true,
    )?;
    info!(rows = written, skipped = skipped.values().sum::<usize>(), "wrote resting heart rate");

    Ok(RestingHeartReport {
        table: TableReport {
            table: "restingHeart".to_string(),
            output,
            files: 1,
            rows: written,
        },
        skipped,
    })
}
