//! Loaded, flattened export documents with typed field access

use crate::config::TransformConfig;
use crate::error::TabulateError;
use crate::flatten::flatten;
use crate::loader::load_document;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// One export file after preamble removal and flattening
#[derive(Debug, Clone)]
pub struct ExportDocument {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl ExportDocument {
    pub fn load(path: &Path, config: &TransformConfig) -> Result<Self, TabulateError> {
        let nested = load_document(path, config.preamble)?;
        Ok(Self::from_nested(path, &nested, &config.delimiter))
    }

    pub fn from_nested(path: &Path, nested: &Map<String, Value>, delimiter: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            fields: flatten(nested, delimiter),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Result<&Value, TabulateError> {
        self.fields
            .get(key)
            .ok_or_else(|| TabulateError::missing(&self.path, key))
    }

    pub fn array(&self, key: &str) -> Result<&[Value], TabulateError> {
        self.get(key)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.unexpected(key, "an array"))
    }

    pub fn str(&self, key: &str) -> Result<&str, TabulateError> {
        self.get(key)?
            .as_str()
            .ok_or_else(|| self.unexpected(key, "a string"))
    }

    pub fn i64(&self, key: &str) -> Result<i64, TabulateError> {
        self.get(key)?
            .as_i64()
            .ok_or_else(|| self.unexpected(key, "an integer"))
    }

    /// String field of an object nested inside this document (e.g. a list entry).
    /// `label` names the containing value in errors.
    pub fn entry_str<'v>(&self, entry: &'v Value, label: &str, field: &str) -> Result<&'v str, TabulateError> {
        let value = self.entry_value(entry, label, field)?;
        value
            .as_str()
            .ok_or_else(|| self.unexpected(&format!("{label}.{field}"), "a string"))
    }

    pub fn entry_value<'v>(&self, entry: &'v Value, label: &str, field: &str) -> Result<&'v Value, TabulateError> {
        entry
            .get(field)
            .ok_or_else(|| TabulateError::missing(&self.path, format!("{label}.{field}")))
    }

    fn unexpected(&self, field: &str, expected: &'static str) -> TabulateError {
        TabulateError::UnexpectedType {
            path: self.path.clone(),
            field: field.to_string(),
            expected,
        }
    }
}
