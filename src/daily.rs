//! Daily metrics transform
//!
//! Daily exports hold one `{dateTime, value}` entry per day under
//! `activities-<metric>`. Every configured metric found in the day directory is
//! written to `<day_dir>/<metric>.csv`; the first document carrying a metric
//! truncates its table, later ones append.

use crate::activity::DailyMetric;
use crate::config::TransformConfig;
use crate::csv_writer::{write_rows, WriteMode};
use crate::discovery::list_files;
use crate::document::ExportDocument;
use crate::error::TabulateError;
use crate::progress::ProgressObserver;
use crate::schema::{ColumnSchema, Row, START_TIME};
use crate::types::TableReport;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Run the transform over every export file in the day directory
pub fn run(
    config: &TransformConfig,
    progress: &mut dyn ProgressObserver,
) -> Result<Vec<TableReport>, TabulateError> {
    let files = list_files(&config.day_dir, &config.extension)?;
    info!(dir = %config.day_dir.display(), files = files.len(), "tabulating daily metrics");

    // Insertion order is the order metrics were first seen
    let mut reports: Vec<TableReport> = Vec::new();

    for (i, file) in files.iter().enumerate() {
        let document = ExportDocument::load(file, config)?;
        let metrics = metrics_in(&document, &config.daily_metrics);
        if metrics.is_empty() {
            warn!(file = %file.display(), "no daily metric found, skipping file");
        }

        for metric in metrics {
            let rows = transform_metric(metric, &document)?;
            let existing = reports.iter().position(|r| r.table == metric.as_str());
            let (mode, write_header) = match existing {
                Some(_) => (WriteMode::Append, false),
                None => (WriteMode::Truncate, true),
            };

            let output = config.day_dir.join(format!("{}.csv", metric.as_str()));
            let written = write_rows(&output, &ColumnSchema::daily(metric), &rows, mode, write_header)?;
            debug!(file = %file.display(), metric = %metric, rows = written, "wrote daily rows");

            match existing {
                Some(idx) => {
                    reports[idx].files += 1;
                    reports[idx].rows += written;
                }
                None => reports.push(TableReport {
                    table: metric.as_str().to_string(),
                    output,
                    files: 1,
                    rows: written,
                }),
            }
        }
        progress.on_file("daily", i + 1, files.len());
    }
    progress.on_table_done("daily");

    Ok(reports)
}

/// Configured metrics with a top-level section in `document`, in document order
pub fn metrics_in(document: &ExportDocument, wanted: &[DailyMetric]) -> Vec<DailyMetric> {
    document
        .fields()
        .keys()
        .filter_map(|key| DailyMetric::from_summary_key(key))
        .filter(|metric| wanted.contains(metric))
        .collect()
}

/// One `startTime, <metric>` row per day entry
pub fn transform_metric(metric: DailyMetric, document: &ExportDocument) -> Result<Vec<Row>, TabulateError> {
    let key = format!("activities-{}", metric.as_str());
    document
        .array(&key)?
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let label = format!("{key}[{i}]");
            let date = document.entry_str(entry, &label, "dateTime")?;
            let value = document.entry_value(entry, &label, "value")?;

            let mut row = Row::new();
            row.insert(START_TIME.to_string(), Value::String(date.to_string()));
            row.insert(metric.as_str().to_string(), value.clone());
            Ok(row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::RecordingProgress;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use std::path::Path;

    fn write_export(dir: &Path, name: &str, body: Value) {
        let banner: String = (0..16).map(|i| format!("banner {i}\n")).collect();
        fs::write(dir.join(name), format!("{banner}{body}")).unwrap();
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_transform_metric() {
        let body = json!({
            "activities-caloriesBMR": [
                {"dateTime": "2021-05-01", "value": "1650"},
                {"dateTime": "2021-05-02", "value": "1648"}
            ]
        });
        let doc = match body {
            Value::Object(map) => ExportDocument::from_nested(Path::new("bmr.json"), &map, "."),
            _ => unreachable!(),
        };

        assert_eq!(metrics_in(&doc, &DailyMetric::ALL), vec![DailyMetric::CaloriesBmr]);
        assert!(metrics_in(&doc, &[DailyMetric::Steps]).is_empty());

        let rows = transform_metric(DailyMetric::CaloriesBmr, &doc).unwrap();
        assert_eq!(
            Value::Object(rows[1].clone()),
            json!({"startTime": "2021-05-02", "caloriesBMR": "1648"})
        );
    }

    #[test]
    fn test_run_writes_one_table_per_metric() {
        let dir = tempfile::tempdir().unwrap();
        write_export(
            dir.path(),
            "activity.json",
            json!({
                "activities-steps": [{"dateTime": "2021-05-01", "value": "8500"}],
                "activities-minutesSedentary": [{"dateTime": "2021-05-01", "value": "700"}]
            }),
        );
        write_export(
            dir.path(),
            "heart.json",
            json!({"activities-heart": [{"dateTime": "2021-05-01", "value": {"restingHeartRate": 58}}]}),
        );
        write_export(
            dir.path(),
            "steps-june.json",
            json!({"activities-steps": [{"dateTime": "2021-06-01", "value": "9100"}]}),
        );

        let config = TransformConfig::default().with_day_dir(dir.path());
        let mut progress = RecordingProgress::default();
        let reports = run(&config, &mut progress).unwrap();

        let tables: Vec<(&str, usize, usize)> = reports
            .iter()
            .map(|r| (r.table.as_str(), r.files, r.rows))
            .collect();
        assert_eq!(tables, vec![("steps", 2, 2), ("minutesSedentary", 1, 1)]);
        assert_eq!(progress.events.len(), 3);

        assert_eq!(
            read_lines(&dir.path().join("steps.csv")),
            vec!["startTime,steps", "2021-05-01,8500", "2021-06-01,9100"]
        );
        assert_eq!(
            read_lines(&dir.path().join("minutesSedentary.csv")),
            vec!["startTime,minutesSedentary", "2021-05-01,700"]
        );
    }

    #[test]
    fn test_unconfigured_metrics_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_export(
            dir.path(),
            "activity.json",
            json!({
                "activities-steps": [{"dateTime": "2021-05-01", "value": "8500"}],
                "activities-floors": [{"dateTime": "2021-05-01", "value": "12"}]
            }),
        );

        let config = TransformConfig::default()
            .with_day_dir(dir.path())
            .with_daily_metrics(vec![DailyMetric::Floors]);
        let mut progress = RecordingProgress::default();
        let reports = run(&config, &mut progress).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].table, "floors");
        assert!(!dir.path().join("steps.csv").exists());
    }

    #[test]
    fn test_entry_without_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_export(
            dir.path(),
            "steps.json",
            json!({"activities-steps": [{"dateTime": "2021-05-01"}]}),
        );

        let config = TransformConfig::default().with_day_dir(dir.path());
        let mut progress = RecordingProgress::default();
        match run(&config, &mut progress) {
            Err(TabulateError::MissingField { field, .. }) => {
                assert_eq!(field, "activities-steps[0].value")
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }
}
