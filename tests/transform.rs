use fitbit_tabulate::progress::RecordingProgress;
use fitbit_tabulate::{
    IntradayActivity, PreambleMode, Selection, SkipReason, TabulateError, Tabulator,
    TransformConfig,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_export(path: &Path, body: &Value) {
    let banner: String = (0..16)
        .map(|i| format!("Fitbit export banner line {}\n", i + 1))
        .collect();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("{}{}", banner, serde_json::to_string_pretty(body).unwrap())).unwrap();
}

fn steps_day(date: &str, samples: Value) -> Value {
    json!({
        "activities-steps": [{"dateTime": date, "value": "1234"}],
        "activities-steps-intraday": {
            "dataset": samples,
            "datasetInterval": 1,
            "datasetType": "minute"
        }
    })
}

fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

fn steps_only(root: &TempDir) -> TransformConfig {
    TransformConfig::default()
        .with_intraday_dir(root.path().join("intraday"))
        .with_day_dir(root.path().join("day"))
        .with_intraday_activities(vec![IntradayActivity::Steps])
}

#[test]
fn steps_from_two_days_share_one_header() {
    let root = tempfile::tempdir().unwrap();
    let intraday = root.path().join("intraday");
    write_export(
        &intraday.join("steps/2021-05-02.json"),
        &steps_day("2021-05-02", json!([{"time": "12:30:00", "value": 40}])),
    );
    write_export(
        &intraday.join("steps/2021-05-01.json"),
        &steps_day(
            "2021-05-01",
            json!([
                {"time": "00:00:00", "value": 0},
                {"time": "00:01:00", "value": 60}
            ]),
        ),
    );

    let mut tabulator = Tabulator::new(steps_only(&root))
        .with_progress(Box::new(RecordingProgress::default()));
    let reports = tabulator.intraday().unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].files, 2);
    assert_eq!(reports[0].rows, 3);

    let rows = read_csv(&intraday.join("steps.csv"));
    assert_eq!(rows[0], vec!["startTime", "steps", "endTime"]);
    assert_eq!(rows.iter().filter(|r| r[0] == "startTime").count(), 1);
    assert_eq!(
        rows[1..].to_vec(),
        vec![
            vec!["2021-05-01 00:00:00", "0", "2021-05-01 00:01:00"],
            vec!["2021-05-01 00:01:00", "60", "2021-05-01 00:02:00"],
            vec!["2021-05-02 12:30:00", "40", "2021-05-02 12:31:00"],
        ]
    );
    assert!(rows[1..].iter().all(|r| !r[2].is_empty()));
}

#[test]
fn heart_table_has_no_end_time_column() {
    let root = tempfile::tempdir().unwrap();
    let intraday = root.path().join("intraday");
    write_export(
        &intraday.join("heart/2021-05-01.json"),
        &json!({
            "activities-heart": [{"dateTime": "2021-05-01", "value": {"restingHeartRate": 57}}],
            "activities-heart-intraday": {
                "dataset": [{"time": "06:00:00", "value": 55}],
                "datasetInterval": 1,
                "datasetType": "second"
            }
        }),
    );

    let config = steps_only(&root).with_intraday_activities(vec![IntradayActivity::Heart]);
    Tabulator::new(config).intraday().unwrap();

    assert_eq!(
        read_csv(&intraday.join("heart.csv")),
        vec![vec!["startTime", "heart"], vec!["2021-05-01 06:00:00", "55"]]
    );
}

#[test]
fn resting_heart_skips_and_continues() {
    let root = tempfile::tempdir().unwrap();
    write_export(
        &root.path().join("day/heart.json"),
        &json!({
            "activities-heart": [
                {"dateTime": "2021-05-01", "value": {"heartRateZones": []}},
                {"dateTime": "2021-05-02", "value": {"heartRateZones": [], "restingHeartRate": 61}}
            ]
        }),
    );

    let report = Tabulator::new(steps_only(&root)).resting_heart().unwrap();
    assert_eq!(report.table.rows, 1);
    assert_eq!(report.skipped[&SkipReason::MissingRestingHeartRate], 1);
    assert_eq!(
        read_csv(&root.path().join("day/restingHeart.csv")),
        vec![vec!["startTime", "restingHeartRate"], vec!["2021-05-02", "61"]]
    );
}

#[test]
fn detected_preamble_handles_other_banner_lengths() {
    let root = tempfile::tempdir().unwrap();
    let path = root.path().join("intraday/steps/2021-05-01.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let body = steps_day("2021-05-01", json!([{"time": "00:00:00", "value": 1}]));
    fs::write(&path, format!("exporter v2\ngenerated today\n{}", body)).unwrap();

    let fixed = steps_only(&root);
    assert!(matches!(
        Tabulator::new(fixed.clone()).intraday(),
        Err(TabulateError::PreambleTooShort { .. })
    ));

    let detect = fixed.with_preamble(PreambleMode::Detect);
    let reports = Tabulator::new(detect).intraday().unwrap();
    assert_eq!(reports[0].rows, 1);
}

#[test]
fn full_run_reports_every_table() {
    let root = tempfile::tempdir().unwrap();
    write_export(
        &root.path().join("intraday/steps/2021-05-01.json"),
        &steps_day("2021-05-01", json!([{"time": "00:00:00", "value": 3}])),
    );
    write_export(
        &root.path().join("day/heart.json"),
        &json!({"activities-heart": [{"dateTime": "2021-05-01", "value": {"restingHeartRate": 58}}]}),
    );
    write_export(
        &root.path().join("day/calories.json"),
        &json!({"activities-calories": [
            {"dateTime": "2021-05-01", "value": "2300"},
            {"dateTime": "2021-05-02", "value": "2150"}
        ]}),
    );

    let report = Tabulator::new(steps_only(&root)).run(Selection::ALL).unwrap();
    assert_eq!(report.total_rows(), 4);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["resting_heart"]["rows"], 1);
    assert_eq!(json["intraday"][0]["table"], "steps");
    assert_eq!(json["daily"][0]["table"], "calories");
    assert_eq!(
        read_csv(&root.path().join("day/calories.csv")),
        vec![
            vec!["startTime", "calories"],
            vec!["2021-05-01", "2300"],
            vec!["2021-05-02", "2150"],
        ]
    );
}
