// src/network/assemble.rs
//! Forest assembly: parent resolution, primary-root selection, partitioning.
//!
//! Nodes live in an arena (`Vec<Node>`) and relationships are arena indices.
//! Parent slots are settled first; child lists are derived from them only
//! once every slot is final, so a node can never sit in two child lists.

use std::collections::HashMap;

use crate::types::{Node, NodeId};

/// Lookup tables over the materialized nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    pub by_id: HashMap<NodeId, usize>,
    /// Recruiters only. The first node to claim a code keeps it.
    pub by_code: HashMap<String, usize>,
}

impl NodeIndex {
    #[must_use]
    pub fn build(nodes: &[Node]) -> Self {
        let mut index = Self::default();
        for (i, node) in nodes.iter().enumerate() {
            if let Some(&first) = index.by_id.get(&node.id) {
                tracing::warn!(id = %node.id, first, duplicate = i, "duplicate node id; first occurrence wins");
            } else {
                index.by_id.insert(node.id, i);
            }

            let Some(code) = node.code.as_ref().filter(|_| node.is_recruiter()) else {
                continue;
            };
            if let Some(&first) = index.by_code.get(code) {
                tracing::warn!(%code, first, shadowed = i, "referral code claimed twice; first occurrence wins");
            } else {
                index.by_code.insert(code.clone(), i);
            }
        }
        index
    }
}

/// The assembled, not yet ranked, forest.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub nodes: Vec<Node>,
    pub index: NodeIndex,
    pub parents: Vec<Option<usize>>,
    /// Children per node, in materialization order.
    pub children: Vec<Vec<usize>>,
    /// Parentless recruiters. Normally just the primary root.
    pub roots: Vec<usize>,
    /// Parentless leads.
    pub orphans: Vec<usize>,
    pub primary_root: Option<usize>,
}

impl Assembly {
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Links nodes into trees.
///
/// `root_codes` are the conventional top-of-program codes in priority order,
/// already normalized.
#[must_use]
pub fn assemble(nodes: Vec<Node>, root_codes: &[String]) -> Assembly {
    let index = NodeIndex::build(&nodes);
    let mut parents = resolve_parents(&nodes, &index);

    let primary_root = select_primary_root(&nodes, &index, root_codes);
    if let Some(primary) = primary_root {
        normalize_roots(&nodes, &mut parents, primary);
    }

    let children = collect_children(&parents);
    let (roots, orphans) = partition_top_level(&nodes, &parents);

    tracing::debug!(
        nodes = nodes.len(),
        roots = roots.len(),
        orphans = orphans.len(),
        "assembled forest"
    );

    Assembly {
        nodes,
        index,
        parents,
        children,
        roots,
        orphans,
        primary_root,
    }
}

fn resolve_parents(nodes: &[Node], index: &NodeIndex) -> Vec<Option<usize>> {
    let mut parents: Vec<Option<usize>> = vec![None; nodes.len()];
    // A node nobody has attached to yet cannot be anyone's ancestor.
    let mut adopted = vec![false; nodes.len()];
    for (i, node) in nodes.iter().enumerate() {
        parents[i] = resolve_parent(i, node, index, &parents, adopted[i]);
        if let Some(p) = parents[i] {
            adopted[p] = true;
        }
    }
    parents
}

/// Explicit parent id first, then parent referral code. A candidate that is
/// the node itself, or that already descends from it, counts as unresolved.
fn resolve_parent(
    i: usize,
    node: &Node,
    index: &NodeIndex,
    parents: &[Option<usize>],
    has_children: bool,
) -> Option<usize> {
    let by_id = node.parent_id.and_then(|pid| index.by_id.get(&pid).copied());
    let by_code = node
        .parent_code
        .as_ref()
        .and_then(|code| index.by_code.get(code).copied());

    for candidate in [by_id, by_code].into_iter().flatten() {
        if candidate == i {
            tracing::warn!(id = %node.id, "node names itself as parent; ignoring");
            continue;
        }
        if has_children && descends_from(candidate, i, parents) {
            tracing::warn!(id = %node.id, "parent reference would close a cycle; ignoring");
            continue;
        }
        return Some(candidate);
    }

    if node.parent_id.is_some() || node.parent_code.is_some() {
        tracing::debug!(id = %node.id, "parent reference did not resolve");
    }
    None
}

/// True if `ancestor` appears on the parent chain starting at `start`.
fn descends_from(start: usize, ancestor: usize, parents: &[Option<usize>]) -> bool {
    let mut current = Some(start);
    // The chain is acyclic by construction; the step bound only caps damage
    // if that ever stops holding.
    for _ in 0..=parents.len() {
        match current {
            Some(c) if c == ancestor => return true,
            Some(c) => current = parents.get(c).copied().flatten(),
            None => return false,
        }
    }
    true
}

/// First conventional code that resolves, else the first recruiter in
/// materialization order.
fn select_primary_root(nodes: &[Node], index: &NodeIndex, root_codes: &[String]) -> Option<usize> {
    let conventional = root_codes
        .iter()
        .find_map(|code| index.by_code.get(code).copied());
    if conventional.is_none() {
        tracing::debug!("no conventional root code resolved; using first recruiter");
    }
    conventional.or_else(|| nodes.iter().position(Node::is_recruiter))
}

/// Detaches the primary root and hangs every other parentless recruiter under it.
fn normalize_roots(nodes: &[Node], parents: &mut [Option<usize>], primary: usize) {
    parents[primary] = None;
    for (i, node) in nodes.iter().enumerate() {
        if i != primary && node.is_recruiter() && parents[i].is_none() {
            parents[i] = Some(primary);
        }
    }
}

fn collect_children(parents: &[Option<usize>]) -> Vec<Vec<usize>> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); parents.len()];
    for (i, parent) in parents.iter().enumerate() {
        if let Some(p) = *parent {
            children[p].push(i);
        }
    }
    children
}

fn partition_top_level(nodes: &[Node], parents: &[Option<usize>]) -> (Vec<usize>, Vec<usize>) {
    nodes
        .iter()
        .enumerate()
        .filter(|(i, _)| parents[*i].is_none())
        .map(|(i, node)| (i, node.is_recruiter()))
        .fold((Vec::new(), Vec::new()), |(mut roots, mut orphans), (i, is_recruiter)| {
            if is_recruiter {
                roots.push(i);
            } else {
                orphans.push(i);
            }
            (roots, orphans)
        })
}
