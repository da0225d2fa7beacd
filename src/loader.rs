//! Export file loading
//!
//! Fitbit export files start with a banner of non-JSON lines before the
//! document itself. The loader drops the banner and parses the remainder.

use crate::config::PreambleMode;
use crate::error::TabulateError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Read an export file and return its top-level JSON object
pub fn load_document(path: &Path, preamble: PreambleMode) -> Result<Map<String, Value>, TabulateError> {
    let content = fs::read_to_string(path).map_err(|e| TabulateError::io(path, e))?;
    parse_document(path, &content, preamble)
}

/// Parse already-read file content. `path` is only used in errors.
pub fn parse_document(
    path: &Path,
    content: &str,
    preamble: PreambleMode,
) -> Result<Map<String, Value>, TabulateError> {
    let body = strip_preamble(path, content, preamble)?;

    let value: Value = serde_json::from_str(body).map_err(|source| TabulateError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(TabulateError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

fn strip_preamble<'a>(
    path: &Path,
    content: &'a str,
    preamble: PreambleMode,
) -> Result<&'a str, TabulateError> {
    match preamble {
        PreambleMode::Lines(count) => {
            let mut rest = content;
            for skipped in 0..count {
                match rest.find('\n') {
                    Some(idx) => rest = &rest[idx + 1..],
                    // A final line without a newline still counts as a line
                    None if !rest.is_empty() && skipped + 1 == count => rest = "",
                    None => {
                        return Err(TabulateError::PreambleTooShort {
                            path: path.to_path_buf(),
                            expected: count,
                            found: content.lines().count(),
                        })
                    }
                }
            }
            Ok(rest)
        }
        PreambleMode::Detect => {
            let mut offset = 0;
            for line in content.split_inclusive('\n') {
                let trimmed = line.trim_start();
                if trimmed.starts_with('{') || trimmed.starts_with('[') {
                    return Ok(&content[offset..]);
                }
                offset += line.len();
            }
            Err(TabulateError::NoJsonBody {
                path: path.to_path_buf(),
            })
        }
    }
}
