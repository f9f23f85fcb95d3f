// tests/unit_assemble.rs
//! Tests for parent resolution, primary-root selection and partitioning.

use refnet_core::config::NetworkConfig;
use refnet_core::network::assemble::{assemble, Assembly};
use refnet_core::network::materialize::materialize;
use refnet_core::types::{DirectoryEntry, SourceRecord};
use serde_json::json;

fn build(value: serde_json::Value, codes: &[&str]) -> Assembly {
    let recs: Vec<SourceRecord> = serde_json::from_value(value).unwrap();
    let dir: Vec<DirectoryEntry> = codes.iter().map(|c| DirectoryEntry::new(c)).collect();
    let config = NetworkConfig::default();
    let nodes = materialize(&recs, &dir, &config);
    assemble(nodes, &config.normalized_root_codes())
}

fn ids(a: &Assembly, list: &[usize]) -> Vec<i64> {
    list.iter().map(|&i| a.nodes[i].id.get()).collect()
}

fn parent_of(a: &Assembly, id: i64) -> Option<i64> {
    let i = a.nodes.iter().position(|n| n.id.get() == id)?;
    a.parents[i].map(|p| a.nodes[p].id.get())
}

#[test]
fn test_child_attached_by_code() {
    let a = build(
        json!([
            {"id": 1, "kind": "recruiter", "code": "01"},
            {"id": 2, "kind": "lead", "parent_code": "01"}
        ]),
        &["01"],
    );
    assert_eq!(ids(&a, &a.roots), vec![1]);
    assert!(a.orphans.is_empty());
    assert_eq!(ids(&a, &a.children[0]), vec![2]);
}

#[test]
fn test_explicit_parent_id_beats_code() {
    let a = build(
        json!([
            {"id": 1, "kind": "recruiter", "code": "01"},
            {"id": 2, "kind": "recruiter", "code": "02", "parent_code": "01"},
            {"id": 3, "kind": "lead", "parent_id": 2, "parent_code": "01"}
        ]),
        &[],
    );
    assert_eq!(parent_of(&a, 3), Some(2));
}

#[test]
fn test_dangling_parent_id_falls_back_to_code() {
    let a = build(
        json!([
            {"id": 1, "kind": "recruiter", "code": "01"},
            {"id": 3, "kind": "lead", "parent_id": 404, "parent_code": "01"}
        ]),
        &[],
    );
    assert_eq!(parent_of(&a, 3), Some(1));
}

#[test]
fn test_self_parent_degrades_to_parentless() {
    let a = build(
        json!([
            {"id": 1, "kind": "recruiter", "code": "01"},
            {"id": 4, "kind": "lead", "parent_id": 4}
        ]),
        &[],
    );
    assert_eq!(parent_of(&a, 4), None);
    assert_eq!(ids(&a, &a.orphans), vec![4]);
}

#[test]
fn test_mutual_references_do_not_form_a_cycle() {
    let a = build(
        json!([
            {"id": 1, "kind": "recruiter", "code": "05", "parent_code": "06"},
            {"id": 2, "kind": "recruiter", "code": "06", "parent_code": "05"}
        ]),
        &[],
    );
    // No conventional root resolves, so the first recruiter becomes primary.
    assert_eq!(ids(&a, &a.roots), vec![1]);
    assert_eq!(parent_of(&a, 1), None);
    assert_eq!(parent_of(&a, 2), Some(1));
}

#[test]
fn test_longer_parent_id_cycle_is_broken() {
    let a = build(
        json!([
            {"id": 1, "kind": "lead", "parent_id": 3},
            {"id": 2, "kind": "lead", "parent_id": 1},
            {"id": 3, "kind": "lead", "parent_id": 2}
        ]),
        &[],
    );
    assert_eq!(parent_of(&a, 1), Some(3));
    assert_eq!(parent_of(&a, 2), Some(1));
    assert_eq!(parent_of(&a, 3), None);
    assert_eq!(ids(&a, &a.orphans), vec![3]);
}

#[test]
fn test_primary_root_loses_its_claimed_parent() {
    let a = build(
        json!([
            {"id": 1, "kind": "recruiter", "code": "01", "parent_code": "05"},
            {"id": 2, "kind": "recruiter", "code": "05"}
        ]),
        &[],
    );
    assert_eq!(ids(&a, &a.roots), vec![1]);
    assert_eq!(parent_of(&a, 1), None);
    assert_eq!(parent_of(&a, 2), Some(1));
}

#[test]
fn test_conventional_codes_in_priority_order() {
    let a = build(
        json!([
            {"id": 1, "kind": "recruiter", "code": "01"},
            {"id": 2, "kind": "recruiter", "code": "00"}
        ]),
        &[],
    );
    assert_eq!(a.primary_root.map(|i| a.nodes[i].id.get()), Some(2));
    assert_eq!(parent_of(&a, 1), Some(2));
}

#[test]
fn test_parentless_recruiters_are_absorbed() {
    let a = build(
        json!([
            {"id": 1, "kind": "recruiter", "code": "01"},
            {"id": 2, "kind": "recruiter", "code": "02"},
            {"id": 3, "kind": "recruiter", "code": "03"},
            {"id": 4, "kind": "lead"}
        ]),
        &["04"],
    );
    assert_eq!(ids(&a, &a.roots), vec![1]);
    assert_eq!(ids(&a, &a.children[0]), vec![2, 3, -1_000_004]);
    assert_eq!(ids(&a, &a.orphans), vec![4]);
}

#[test]
fn test_duplicate_code_first_claim_wins() {
    let a = build(
        json!([
            {"id": 10, "kind": "recruiter", "code": "7"},
            {"id": 11, "kind": "recruiter", "code": "07"},
            {"id": 12, "kind": "lead", "parent_code": "07"}
        ]),
        &[],
    );
    let first = a.index.by_code.get("07").copied();
    assert_eq!(first.map(|i| a.nodes[i].id.get()), Some(10));
    assert_eq!(parent_of(&a, 12), Some(10));
    // Neither record is dropped.
    assert_eq!(a.len(), 3);
}

#[test]
fn test_leads_only_has_no_roots() {
    let a = build(
        json!([
            {"id": 9, "kind": "lead", "parent_code": "99"},
            {"id": 8, "kind": "lead"}
        ]),
        &[],
    );
    assert!(a.primary_root.is_none());
    assert!(a.roots.is_empty());
    assert_eq!(ids(&a, &a.orphans), vec![9, 8]);
}

#[test]
fn test_no_node_appears_in_two_child_lists() {
    let a = build(
        json!([
            {"id": 1, "kind": "recruiter", "code": "01", "parent_id": 3},
            {"id": 2, "kind": "recruiter", "code": "02", "parent_code": "01"},
            {"id": 3, "kind": "recruiter", "code": "03", "parent_code": "02"},
            {"id": 4, "kind": "lead", "parent_id": 3, "parent_code": "02"}
        ]),
        &["05"],
    );
    let mut seen = std::collections::HashSet::new();
    for list in &a.children {
        for &c in list {
            assert!(seen.insert(c), "node {c} listed under two parents");
        }
    }
    let top = a.roots.len() + a.orphans.len();
    assert_eq!(seen.len() + top, a.len());
}
