// src/network/ranking.rs
//! Deterministic sibling ordering.
//!
//! Runs after aggregation and produces fresh child lists; the assembly's own
//! lists are left in materialization order.

use std::cmp::{Ordering, Reverse};

use super::assemble::Assembly;
use crate::types::{Node, NodeId, NodeMetrics};

/// Display order for every sibling list in the forest.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    pub children: Vec<Vec<usize>>,
    pub roots: Vec<usize>,
    pub orphans: Vec<usize>,
}

/// Sort key: most direct referrals, then largest subtree, recruiters before
/// leads, then case-insensitive name. Exact name and id break any remaining
/// tie so the order never depends on input position.
///
/// Names compare by Unicode lowercase and code point, not by locale
/// collation: accented letters sort after `z` ("Ágata" follows "Zoe").
type RankKey = (Reverse<usize>, Reverse<usize>, u8, String, String, NodeId);

#[must_use]
pub fn rank_key(node: &Node, metrics: &NodeMetrics) -> RankKey {
    (
        Reverse(metrics.direct_total()),
        Reverse(metrics.total_descendants),
        u8::from(!node.is_recruiter()),
        node.name.to_lowercase(),
        node.name.clone(),
        node.id,
    )
}

/// Compares two siblings by display precedence.
#[must_use]
pub fn compare(a: (&Node, &NodeMetrics), b: (&Node, &NodeMetrics)) -> Ordering {
    rank_key(a.0, a.1).cmp(&rank_key(b.0, b.1))
}

/// Orders every child list plus the top-level roots and orphans.
#[must_use]
pub fn rank(assembly: &Assembly, metrics: &[NodeMetrics]) -> Ranking {
    let sorted = |list: &[usize]| -> Vec<usize> {
        let mut out = list.to_vec();
        out.sort_by_cached_key(|&i| rank_key(&assembly.nodes[i], &metrics[i]));
        out
    };

    Ranking {
        children: assembly.children.iter().map(|c| sorted(c.as_slice())).collect(),
        roots: sorted(assembly.roots.as_slice()),
        orphans: sorted(assembly.orphans.as_slice()),
    }
}
