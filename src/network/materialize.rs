// src/network/materialize.rs
//! Node materialization: flat records in, uniform nodes out.
//!
//! Real records are emitted first, in input order, followed by one
//! placeholder recruiter per directory code that no real recruiter claims.
//! That ordering is what lets real nodes win code-index ties downstream.

use std::collections::{HashMap, HashSet};

use super::codes;
use crate::config::NetworkConfig;
use crate::types::{DirectoryEntry, Node, NodeId, NodeKind, SourceRecord};

const RECRUITER_MARKERS: &[&str] = &["recruiter", "recrutador", "recrutadora", "r", "true", "1"];

/// Maps records and directory entries to nodes. Never fails; malformed
/// fields degrade to empty values.
#[must_use]
pub fn materialize(
    records: &[SourceRecord],
    directory: &[DirectoryEntry],
    config: &NetworkConfig,
) -> Vec<Node> {
    let directory_names = index_directory(directory);
    let mut nodes: Vec<Node> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| materialize_record(index, record, &directory_names))
        .collect();

    let claimed: HashSet<String> = nodes
        .iter()
        .filter(|n| n.is_recruiter())
        .filter_map(|n| n.code.clone())
        .collect();

    let placeholders = synthesize_virtual(directory, &claimed, config);
    tracing::debug!(
        real = nodes.len(),
        placeholders = placeholders.len(),
        "materialized nodes"
    );
    nodes.extend(placeholders);
    nodes
}

struct DirectoryInfo<'a> {
    name: Option<&'a str>,
    url: Option<&'a str>,
}

fn index_directory(directory: &[DirectoryEntry]) -> HashMap<String, DirectoryInfo<'_>> {
    let mut map = HashMap::new();
    for entry in directory {
        let Some(code) = entry.code.as_deref().and_then(codes::normalize_code) else {
            continue;
        };
        map.entry(code).or_insert(DirectoryInfo {
            name: entry.name.as_deref(),
            url: entry.url.as_deref(),
        });
    }
    map
}

fn materialize_record(
    index: usize,
    record: &SourceRecord,
    directory: &HashMap<String, DirectoryInfo<'_>>,
) -> Option<Node> {
    let Some(id) = record.id else {
        tracing::warn!(index, "skipping record without a numeric id");
        return None;
    };

    let own_code = record.code.as_deref().and_then(codes::normalize_code);
    let kind = classify(record.kind.as_deref(), own_code.is_some());
    let code = if kind.is_recruiter() { own_code } else { None };
    let parent_code = record.parent_code.as_deref().and_then(codes::normalize_code);
    let listing = code.as_deref().and_then(|c| directory.get(c));

    let name = infer_name(
        record.name.as_deref(),
        listing.and_then(|l| l.name),
        code.as_deref(),
        parent_code.as_deref(),
        index,
    );

    Some(Node {
        id: NodeId(id),
        kind,
        name,
        code,
        phone: record.phone.clone(),
        city: record.city.clone(),
        url: listing.and_then(|l| l.url).map(str::to_string),
        level: record.level.and_then(|l| u32::try_from(l).ok()),
        parent_id: record.parent_id.map(NodeId),
        parent_code,
        is_virtual: false,
        attended: record.attended,
        duplicate: record.duplicate,
    })
}

/// An explicit indicator decides; without one, holding a code makes a recruiter.
fn classify(raw_kind: Option<&str>, has_code: bool) -> NodeKind {
    match raw_kind {
        Some(raw) => {
            let lowered = raw.trim().to_lowercase();
            if RECRUITER_MARKERS.contains(&lowered.as_str()) {
                NodeKind::Recruiter
            } else {
                NodeKind::Lead
            }
        }
        None if has_code => NodeKind::Recruiter,
        None => NodeKind::Lead,
    }
}

fn infer_name(
    raw: Option<&str>,
    directory_name: Option<&str>,
    code: Option<&str>,
    parent_code: Option<&str>,
    index: usize,
) -> String {
    if let Some(name) = raw.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    if let Some(name) = directory_name.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    if let Some(code) = code {
        return codes::recruiter_label(code);
    }
    if let Some(parent) = parent_code {
        return codes::referral_label(parent);
    }
    codes::enrollee_label(index)
}

fn synthesize_virtual(
    directory: &[DirectoryEntry],
    claimed: &HashSet<String>,
    config: &NetworkConfig,
) -> Vec<Node> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for entry in directory {
        let Some(code) = entry.code.as_deref().and_then(codes::normalize_code) else {
            continue;
        };
        if claimed.contains(&code) || !seen.insert(code.clone()) {
            continue;
        }
        let Some(id) = codes::virtual_id(&code, config.virtual_id_base) else {
            tracing::warn!(%code, "code outside the placeholder id range; no placeholder created");
            continue;
        };
        let directory_name = entry.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
        out.push(Node {
            id,
            kind: NodeKind::Recruiter,
            name: codes::virtual_label(&config.virtual_label, &code, directory_name),
            code: Some(code),
            phone: None,
            city: None,
            url: entry.url.clone(),
            level: None,
            parent_id: None,
            parent_code: None,
            is_virtual: true,
            attended: false,
            duplicate: false,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(Some("Recruiter"), false), NodeKind::Recruiter);
        assert_eq!(classify(Some(" recrutadora "), false), NodeKind::Recruiter);
        assert_eq!(classify(Some("lead"), true), NodeKind::Lead);
        assert_eq!(classify(None, true), NodeKind::Recruiter);
        assert_eq!(classify(None, false), NodeKind::Lead);
    }

    #[test]
    fn test_name_fallback_order() {
        assert_eq!(infer_name(Some(" Ana "), Some("Dir"), Some("01"), None, 0), "Ana");
        assert_eq!(infer_name(Some(""), Some("Dir"), Some("01"), None, 0), "Dir");
        assert_eq!(infer_name(None, None, Some("01"), Some("02"), 0), "Recruiter 01");
        assert_eq!(infer_name(None, None, None, Some("02"), 0), "Referral of 02");
        assert_eq!(infer_name(None, None, None, None, 4), "Enrollee #5");
    }
}
