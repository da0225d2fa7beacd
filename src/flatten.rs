//! Nested object flattening
//!
//! Collapses nested JSON objects into a single level keyed by delimiter-joined
//! paths (`a.b.c`). Arrays and scalars are leaves and are never descended into.

use serde_json::{Map, Value};

pub const DEFAULT_DELIMITER: &str = ".";

/// Flatten `object` so that every non-object value sits under its joined path.
///
/// Keys keep document order. When two paths join to the same key the later one
/// wins.
pub fn flatten(object: &Map<String, Value>, delimiter: &str) -> Map<String, Value> {
    let mut flat = Map::new();
    flatten_into(&mut flat, None, object, delimiter);
    flat
}

fn flatten_into(
    flat: &mut Map<String, Value>,
    prefix: Option<&str>,
    object: &Map<String, Value>,
    delimiter: &str,
) {
    for (key, value) in object {
        let path = match prefix {
            Some(p) => format!("{p}{delimiter}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(inner) => flatten_into(flat, Some(&path), inner, delimiter),
            leaf => {
                flat.insert(path, leaf.clone());
            }
        }
    }
}

/// Rebuild nested objects by splitting keys on `delimiter`.
///
/// Inverse of [`flatten`] for inputs whose keys do not themselves contain the
/// delimiter and that have no empty nested objects.
pub fn unflatten(flat: &Map<String, Value>, delimiter: &str) -> Map<String, Value> {
    let mut root = Map::new();
    for (key, value) in flat {
        let mut parts: Vec<&str> = key.split(delimiter).collect();
        let last = parts.pop().unwrap_or_default();

        let mut node = &mut root;
        for part in parts {
            let entry = node
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            node = match entry {
                Value::Object(map) => map,
                _ => unreachable!("entry was just made an object"),
            };
        }
        node.insert(last.to_string(), value.clone());
    }
    root
}
