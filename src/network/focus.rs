// src/network/focus.rs
//! Focus resolution and ancestor paths.

use std::collections::HashSet;

use super::assemble::NodeIndex;
use super::codes;
use crate::types::{Focus, Node, NodeId};

/// Resolves a focus query to an arena index.
///
/// A numeric query is tried as a node id first, then as a referral code.
/// Negative numbers are only ever ids.
#[must_use]
pub fn resolve(query: &str, index: &NodeIndex) -> Option<usize> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if let Ok(id) = query.parse::<i64>() {
        if let Some(&i) = index.by_id.get(&NodeId(id)) {
            return Some(i);
        }
        if id < 0 {
            return None;
        }
    }
    codes::normalize_code(query).and_then(|code| index.by_code.get(&code).copied())
}

/// Indices from the topmost ancestor down to `start`, inclusive.
///
/// Stops at an empty parent slot or at the first repeated index, so a
/// corrupted parent chain can never loop forever.
#[must_use]
pub fn ancestor_path(start: usize, parents: &[Option<usize>]) -> Vec<usize> {
    let mut seen = HashSet::new();
    let mut path = Vec::new();
    let mut current = Some(start);

    while let Some(i) = current {
        if !seen.insert(i) {
            tracing::warn!(index = i, "cycle in parent chain; path truncated");
            break;
        }
        path.push(i);
        current = parents.get(i).copied().flatten();
    }

    path.reverse();
    path
}

/// Builds the focus descriptor for `query`, or `None` if nothing matches.
#[must_use]
pub fn build_focus(
    query: &str,
    nodes: &[Node],
    index: &NodeIndex,
    parents: &[Option<usize>],
) -> Option<Focus> {
    let Some(target) = resolve(query, index) else {
        tracing::debug!(query, "focus target not found; showing unfiltered view");
        return None;
    };
    let node = &nodes[target];
    Some(Focus {
        code: node.code.clone(),
        name: node.name.clone(),
        node_id: node.id,
        path: ancestor_path(target, parents)
            .into_iter()
            .map(|i| nodes[i].id)
            .collect(),
    })
}
