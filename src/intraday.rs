//! Intraday transform
//!
//! Turns each day's intraday export (`<root>/<activity>/*.json`) into rows of
//! `startTime, <activity>[, endTime]` and accumulates them into
//! `<root>/<activity>.csv`. Files are processed in sorted order; the first one
//! truncates the table and writes the header, later ones append.

use crate::activity::{IntervalUnit, IntradayActivity};
use crate::config::TransformConfig;
use crate::csv_writer::{write_rows, WriteMode};
use crate::discovery::list_files;
use crate::document::ExportDocument;
use crate::error::TabulateError;
use crate::progress::ProgressObserver;
use crate::schema::{ColumnSchema, Row, END_TIME, START_TIME};
use crate::types::TableReport;
use chrono::{Duration, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, info};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Run the transform for every configured activity
pub fn run(
    config: &TransformConfig,
    progress: &mut dyn ProgressObserver,
) -> Result<Vec<TableReport>, TabulateError> {
    let mut reports = Vec::with_capacity(config.intraday_activities.len());
    for &activity in &config.intraday_activities {
        reports.push(tabulate_activity(config, activity, progress)?);
    }
    Ok(reports)
}

/// Build `<activity>.csv` from every export file of one activity
pub fn tabulate_activity(
    config: &TransformConfig,
    activity: IntradayActivity,
    progress: &mut dyn ProgressObserver,
) -> Result<TableReport, TabulateError> {
    let activity_dir = config.intraday_dir.join(activity.as_str());
    let output = config.intraday_dir.join(format!("{}.csv", activity.as_str()));
    let files = list_files(&activity_dir, &config.extension)?;
    let schema = ColumnSchema::intraday(activity);

    info!(activity = %activity, dir = %activity_dir.display(), files = files.len(), "tabulating intraday data");

    let mut rows_written = 0;
    for (i, file) in files.iter().enumerate() {
        let document = ExportDocument::load(file, config)?;
        let rows = transform_document(activity, &document)?;

        let (mode, write_header) = if i == 0 {
            (WriteMode::Truncate, true)
        } else {
            (WriteMode::Append, false)
        };
        rows_written += write_rows(&output, &schema, &rows, mode, write_header)?;

        debug!(file = %file.display(), rows = rows.len(), "wrote intraday rows");
        progress.on_file(activity.as_str(), i + 1, files.len());
    }
    progress.on_table_done(activity.as_str());

    Ok(TableReport {
        table: activity.as_str().to_string(),
        output,
        files: files.len(),
        rows: rows_written,
    })
}

/// Convert one day's document into output rows
pub fn transform_document(
    activity: IntradayActivity,
    document: &ExportDocument,
) -> Result<Vec<Row>, TabulateError> {
    let summary_key = activity.summary_key();
    let day = document
        .array(&summary_key)?
        .first()
        .ok_or_else(|| TabulateError::missing(document.path(), format!("{summary_key}[0]")))?;
    let date = document.entry_str(day, &format!("{summary_key}[0]"), "dateTime")?;

    let dataset_key = activity.intraday_key("dataset");
    let dataset = document.array(&dataset_key)?;
    if dataset.is_empty() {
        return Err(TabulateError::EmptyDataset {
            path: document.path().to_path_buf(),
        });
    }

    let step = if activity.has_end_time() {
        let interval = document.i64(&activity.intraday_key("datasetInterval"))?;
        let unit = IntervalUnit::parse(document.str(&activity.intraday_key("datasetType"))?)?;
        Some(unit.duration(interval)?)
    } else {
        None
    };

    dataset
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let label = format!("{dataset_key}[{i}]");
            let time = document.entry_str(sample, &label, "time")?;
            let value = document.entry_value(sample, &label, "value")?;
            let mut row = observation(activity, date, time, value, step)?;

            // Any other sample fields are carried so the schema check can reject them
            if let Value::Object(extra) = sample {
                for (key, v) in extra {
                    if key != "time" && key != "value" {
                        row.insert(key.clone(), v.clone());
                    }
                }
            }
            Ok(row)
        })
        .collect()
}

/// Build one observation row from a sample's local time and value.
///
/// `step` is the sampling interval; when present the row gets an `endTime`.
pub fn observation(
    activity: IntradayActivity,
    date: &str,
    time: &str,
    value: &Value,
    step: Option<Duration>,
) -> Result<Row, TabulateError> {
    let start = format!("{date} {time}");

    let mut row = Row::new();
    if let Some(step) = step {
        let end = end_time(&start, step)?;
        row.insert(START_TIME.to_string(), Value::String(start));
        row.insert(activity.as_str().to_string(), value.clone());
        row.insert(END_TIME.to_string(), Value::String(end));
    } else {
        row.insert(START_TIME.to_string(), Value::String(start));
        row.insert(activity.as_str().to_string(), value.clone());
    }
    Ok(row)
}

/// `start + step`, both as `YYYY-MM-DD HH:MM:SS`
pub fn end_time(start: &str, step: Duration) -> Result<String, TabulateError> {
    let parsed = NaiveDateTime::parse_from_str(start, TIMESTAMP_FORMAT).map_err(|e| {
        TabulateError::DateParse {
            value: start.to_string(),
            reason: e.to_string(),
        }
    })?;
    let end = parsed
        .checked_add_signed(step)
        .ok_or_else(|| TabulateError::IntervalOutOfRange(format!("{start} + {step}")))?;
    Ok(end.format(TIMESTAMP_FORMAT).to_string())
}
