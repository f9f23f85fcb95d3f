// src/types/record.rs
//! Input adapter for upstream snapshots.
//!
//! Enrollment exports are free-form: the same concept shows up under several
//! keys, and ids or codes arrive as either strings or numbers. Everything is
//! absorbed here so the rest of the pipeline only ever sees canonical fields.
//!
//! Rows are decoded from a JSON object by hand rather than with serde aliases,
//! because aliases reject a row that carries two synonyms of one field.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

const KIND_KEYS: &[&str] = &["kind", "type", "role", "tipo", "is_recruiter"];
const CODE_KEYS: &[&str] = &["code", "referral_code", "ref_code", "codigo"];
const PARENT_CODE_KEYS: &[&str] = &["parent_code", "referrer_code", "ref", "indicado_por"];
const PARENT_ID_KEYS: &[&str] = &["parent_id", "parentId"];
const NAME_KEYS: &[&str] = &["name", "full_name", "nome"];
const PHONE_KEYS: &[&str] = &["phone", "telefone", "whatsapp"];
const CITY_KEYS: &[&str] = &["city", "cidade"];
const LEVEL_KEYS: &[&str] = &["level", "depth", "nivel"];
const ATTENDED_KEYS: &[&str] = &["attended", "presente"];
const DUPLICATE_KEYS: &[&str] = &["duplicate", "is_duplicate", "duplicado"];
const URL_KEYS: &[&str] = &["url", "link"];

/// One flat enrollment or recruiter row as supplied by the record store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRecord {
    pub id: Option<i64>,
    /// Raw kind indicator; interpreted by the materializer.
    pub kind: Option<String>,
    pub code: Option<String>,
    pub parent_code: Option<String>,
    pub parent_id: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub level: Option<i64>,
    pub attended: bool,
    pub duplicate: bool,
}

impl SourceRecord {
    /// Reads the canonical fields out of one export row. Synonyms are tried
    /// in priority order; the first non-null one wins and the rest are ignored.
    #[must_use]
    pub fn from_row(row: &Map<String, Value>) -> Self {
        Self {
            id: pick(row, &["id"]).and_then(value_to_int),
            kind: pick(row, KIND_KEYS).and_then(value_to_text),
            code: pick(row, CODE_KEYS).and_then(value_to_text),
            parent_code: pick(row, PARENT_CODE_KEYS).and_then(value_to_text),
            parent_id: pick(row, PARENT_ID_KEYS).and_then(value_to_int),
            name: pick(row, NAME_KEYS).and_then(value_to_text),
            phone: pick(row, PHONE_KEYS).and_then(value_to_text),
            city: pick(row, CITY_KEYS).and_then(value_to_text),
            level: pick(row, LEVEL_KEYS).and_then(value_to_int),
            attended: pick(row, ATTENDED_KEYS).is_some_and(value_to_flag),
            duplicate: pick(row, DUPLICATE_KEYS).is_some_and(value_to_flag),
        }
    }
}

impl<'de> Deserialize<'de> for SourceRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let row = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_row(&row))
    }
}

/// An entry from the configured-recruiters directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub code: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
}

impl DirectoryEntry {
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_row(row: &Map<String, Value>) -> Self {
        Self {
            code: pick(row, &["code", "codigo"]).and_then(value_to_text),
            name: pick(row, &["name", "nome"]).and_then(value_to_text),
            url: pick(row, URL_KEYS).and_then(value_to_text),
        }
    }
}

impl<'de> Deserialize<'de> for DirectoryEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let row = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_row(&row))
    }
}

fn pick<'a>(row: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| row.get(*key))
        .find(|value| !value.is_null())
}

/// Scalars of any JSON type become trimmed text; blanks and structures become `None`.
fn value_to_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn value_to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        other => value_to_text(other).and_then(|s| s.parse().ok()),
    }
}

fn value_to_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "sim" | "s" | "1" | "x"
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SourceRecord {
        serde_json::from_str(json).expect("record should parse")
    }

    #[test]
    fn accepts_numbers_and_strings_for_codes() {
        let r = parse(r#"{"id": "12", "referral_code": 7, "indicado_por": " 03 "}"#);
        assert_eq!(r.id, Some(12));
        assert_eq!(r.code.as_deref(), Some("7"));
        assert_eq!(r.parent_code.as_deref(), Some("03"));
    }

    #[test]
    fn blank_and_structured_values_degrade_to_none() {
        let r = parse(r#"{"id": 1, "nome": "   ", "cidade": ["x"], "parentId": "abc"}"#);
        assert!(r.name.is_none());
        assert!(r.city.is_none());
        assert!(r.parent_id.is_none());
    }

    #[test]
    fn flags_accept_common_truthy_spellings() {
        let r = parse(r#"{"id": 1, "presente": "Sim", "duplicado": 1}"#);
        assert!(r.attended);
        assert!(r.duplicate);

        let r = parse(r#"{"id": 2, "attended": "no"}"#);
        assert!(!r.attended);
    }

    #[test]
    fn synonyms_of_one_field_take_the_first_non_null() {
        let r = parse(r#"{"id": 2, "name": "Ana", "nome": "Ana Maria", "code": null, "codigo": "04"}"#);
        assert_eq!(r.name.as_deref(), Some("Ana"));
        assert_eq!(r.code.as_deref(), Some("04"));

        let entry: DirectoryEntry =
            serde_json::from_str(r#"{"code": "03", "codigo": "09", "link": "https://x"}"#)
                .expect("entry should parse");
        assert_eq!(entry.code.as_deref(), Some("03"));
        assert_eq!(entry.url.as_deref(), Some("https://x"));
    }

    #[test]
    fn non_object_row_is_an_error() {
        assert!(serde_json::from_str::<SourceRecord>("null").is_err());
        assert!(serde_json::from_str::<SourceRecord>("[1, 2]").is_err());
    }

    #[test]
    fn missing_id_is_none_not_an_error() {
        let r = parse(r#"{"name": "Ana"}"#);
        assert!(r.id.is_none());
        assert_eq!(r.name.as_deref(), Some("Ana"));
    }
}
