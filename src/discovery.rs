//! Export file discovery

use crate::error::TabulateError;
use std::fs;
use std::path::{Path, PathBuf};

/// List regular files directly inside `dir` whose name ends in `.<extension>`,
/// sorted lexicographically. Subdirectories are not searched.
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, TabulateError> {
    let suffix = format!(".{extension}");
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| TabulateError::io(dir, e))? {
        let entry = entry.map_err(|e| TabulateError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| TabulateError::io(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(&suffix) {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}
