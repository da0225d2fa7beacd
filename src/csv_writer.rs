//! CSV table output
//!
//! Rows are written in the order of the supplied [`ColumnSchema`], regardless of
//! the key order inside each row.

use crate::error::TabulateError;
use crate::schema::{ColumnSchema, Row};
use serde_json::Value;
use std::fs::OpenOptions;
use std::path::Path;

/// How an existing output file is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Add rows after any existing content
    Append,
    /// Discard existing content first
    Truncate,
}

/// Write `rows` to `path`, optionally preceded by a header line.
///
/// Every row is checked against `schema` before the file is opened, so a bad
/// row leaves the file untouched. Returns the number of data rows written.
pub fn write_rows(
    path: &Path,
    schema: &ColumnSchema,
    rows: &[Row],
    mode: WriteMode,
    write_header: bool,
) -> Result<usize, TabulateError> {
    schema.check_rows(rows)?;

    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Append => options.append(true),
        WriteMode::Truncate => options.write(true).truncate(true),
    };
    let file = options.open(path).map_err(|e| TabulateError::io(path, e))?;

    let csv_err = |source| TabulateError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if write_header {
        writer.write_record(schema.columns()).map_err(csv_err)?;
    }

    for row in rows {
        let record = schema
            .columns()
            .iter()
            .map(|column| row.get(column).map(cell).unwrap_or_default());
        writer.write_record(record).map_err(csv_err)?;
    }

    writer
        .flush()
        .map_err(|e| TabulateError::io(path, e))?;
    Ok(rows.len())
}

/// Render one JSON value as a CSV cell
pub fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        // Arrays and objects keep their compact JSON form
        other => other.to_string(),
    }
}
