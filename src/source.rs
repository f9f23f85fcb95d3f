// src/source.rs
//! Snapshot loading from the record store and recruiter directory exports.
//!
//! A file that cannot be read, or is not JSON, or has no row array is a
//! real failure: without a snapshot there is nothing to render. Individual
//! rows are decoded one at a time and a bad row is dropped with a warning.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{RefnetError, Result};
use crate::types::{DirectoryEntry, SourceRecord};

/// Keys under which wrapped exports carry their row array.
const ENVELOPE_KEYS: &[&str] = &["data", "records", "recruiters", "rows"];

/// # Errors
/// Returns `RefnetError::Json` if `content` is not JSON and
/// `RefnetError::InvalidInput` if it holds no row array.
pub fn parse_records(content: &str, origin: &Path) -> Result<Vec<SourceRecord>> {
    parse(content, origin)
}

/// # Errors
/// Returns `RefnetError::Json` if `content` is not JSON and
/// `RefnetError::InvalidInput` if it holds no row array.
pub fn parse_directory(content: &str, origin: &Path) -> Result<Vec<DirectoryEntry>> {
    parse(content, origin)
}

/// # Errors
/// Returns error if the file cannot be read or parsed.
pub fn load_records(path: &Path) -> Result<Vec<SourceRecord>> {
    let records = parse_records(&read(path)?, path)?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// # Errors
/// Returns error if the file cannot be read or parsed.
pub fn load_directory(path: &Path) -> Result<Vec<DirectoryEntry>> {
    let entries = parse_directory(&read(path)?, path)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "loaded directory");
    Ok(entries)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| RefnetError::Io {
        source,
        path: path.to_path_buf(),
    })
}

fn parse<T: DeserializeOwned>(content: &str, origin: &Path) -> Result<Vec<T>> {
    let document: Value = serde_json::from_str(content).map_err(|source| RefnetError::Json {
        source,
        path: origin.to_path_buf(),
    })?;
    let rows = into_rows(document).ok_or_else(|| {
        RefnetError::InvalidInput(format!(
            "{}: expected an array of rows or an object with one of {ENVELOPE_KEYS:?}",
            origin.display()
        ))
    })?;

    let mut out = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<T>(row) {
            Ok(item) => out.push(item),
            Err(err) => {
                tracing::warn!(path = %origin.display(), index, %err, "skipping malformed row");
            }
        }
    }
    Ok(out)
}

/// Exports come either as a bare array or wrapped in an object.
fn into_rows(document: Value) -> Option<Vec<Value>> {
    match document {
        Value::Array(rows) => Some(rows),
        Value::Object(mut wrapper) => ENVELOPE_KEYS.iter().find_map(|key| {
            match wrapper.remove(*key) {
                Some(Value::Array(rows)) => Some(rows),
                _ => None,
            }
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_and_wrapped_arrays() {
        let origin = Path::new("inline.json");
        let bare = parse_records(r#"[{"id": 1}, {"id": 2}]"#, origin).unwrap();
        assert_eq!(bare.len(), 2);

        let wrapped = parse_directory(r#"{"recruiters": [{"code": "01"}]}"#, origin).unwrap();
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0].code.as_deref(), Some("01"));
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        let err = parse_records("{not json", Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, RefnetError::Json { .. }));
    }

    #[test]
    fn test_snapshot_without_rows_is_invalid_input() {
        let origin = Path::new("odd.json");
        for content in [r#"{"items": []}"#, r#"{"data": 5}"#, "42"] {
            let err = parse_records(content, origin).unwrap_err();
            assert!(matches!(err, RefnetError::InvalidInput(_)), "Failed: {content}");
        }
    }

    #[test]
    fn test_synonym_clash_row_is_kept() {
        let content = r#"[
            {"id": 1, "kind": "recruiter", "code": "01"},
            {"id": 2, "name": "Ana", "nome": "Ana", "parent_code": "01"}
        ]"#;
        let records = parse_records(content, Path::new("x.json")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name.as_deref(), Some("Ana"));
        assert_eq!(records[1].parent_code.as_deref(), Some("01"));
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let content = r#"{"rows": [
            {"id": 1, "kind": "recruiter", "code": "01"},
            null,
            "stray",
            {"id": 3, "parent_code": "01"}
        ]}"#;
        let records = parse_records(content, Path::new("x.json")).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(3)]);
    }
}
