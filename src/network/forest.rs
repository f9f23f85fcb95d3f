// src/network/forest.rs
//! The ranked forest and its query interface.

use std::fmt::Write;

use serde::ser::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use super::assemble::{Assembly, NodeIndex};
use super::focus;
use super::ranking::Ranking;
use crate::types::{BuildStats, Focus, Node, NodeId, NodeMetrics};

/// Result of one build: nodes, derived metrics and display order.
///
/// Immutable apart from the focus, which can be re-targeted without
/// rebuilding.
#[derive(Debug, Clone)]
pub struct Forest {
    nodes: Vec<Node>,
    metrics: Vec<NodeMetrics>,
    parents: Vec<Option<usize>>,
    index: NodeIndex,
    ranking: Ranking,
    primary_root: Option<usize>,
    stats: BuildStats,
    focus: Option<Focus>,
}

impl Forest {
    #[must_use]
    pub fn new(assembly: Assembly, metrics: Vec<NodeMetrics>, ranking: Ranking) -> Self {
        let stats = compute_stats(&assembly.nodes, ranking.orphans.len());
        Self {
            nodes: assembly.nodes,
            metrics,
            parents: assembly.parents,
            index: assembly.index,
            ranking,
            primary_root: assembly.primary_root,
            stats,
            focus: None,
        }
    }

    #[must_use]
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    #[must_use]
    pub fn focus(&self) -> Option<&Focus> {
        self.focus.as_ref()
    }

    /// Re-targets the focus. Returns whether the query resolved.
    pub fn set_focus(&mut self, query: &str) -> bool {
        self.focus = focus::build_focus(query, &self.nodes, &self.index, &self.parents);
        self.focus.is_some()
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level recruiter trees in display order.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.ranking.roots.iter().map(move |&i| self.at(i))
    }

    /// Parentless leads in display order.
    pub fn orphans(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.ranking.orphans.iter().map(move |&i| self.at(i))
    }

    #[must_use]
    pub fn primary_root(&self) -> Option<NodeRef<'_>> {
        self.primary_root.map(|i| self.at(i))
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.index.by_id.get(&id).map(|&i| self.at(i))
    }

    #[must_use]
    pub fn by_code(&self, code: &str) -> Option<NodeRef<'_>> {
        let code = super::codes::normalize_code(code)?;
        self.index.by_code.get(&code).map(|&i| self.at(i))
    }

    /// Children of `id` in display order. Empty if `id` is unknown.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeRef<'_>> {
        self.node(id)
            .map(|n| n.children().collect())
            .unwrap_or_default()
    }

    /// Resolves an id-or-code query the same way focus does.
    #[must_use]
    pub fn find(&self, query: &str) -> Option<NodeRef<'_>> {
        focus::resolve(query, &self.index).map(|i| self.at(i))
    }

    /// Ids from the top of the tree down to `id`. Empty if `id` is unknown.
    #[must_use]
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        match self.index.by_id.get(&id) {
            Some(&i) => focus::ancestor_path(i, &self.parents)
                .into_iter()
                .map(|a| self.nodes[a].id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// The focused subtree, when a focus is set.
    #[must_use]
    pub fn subtree(&self) -> Option<NodeRef<'_>> {
        self.focus.as_ref().and_then(|f| self.node(f.node_id))
    }

    /// Every node in display order, depth-first, with its depth below the top.
    #[must_use]
    pub fn walk(&self) -> Vec<(usize, NodeRef<'_>)> {
        let tops: Vec<NodeRef<'_>> = self.roots().chain(self.orphans()).collect();
        walk_from(tops)
    }

    /// SHA-256 over the ranked structure. Equal inputs give equal digests.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        let mut line = String::new();
        for (depth, node) in self.walk() {
            line.clear();
            let m = node.metrics();
            let parent = node.parent().map(|p| p.id().get());
            let _ = writeln!(
                line,
                "{depth}|{}|{parent:?}|{}|{}|{}|{}|{}|{}",
                node.id(),
                m.total_descendants,
                m.lead_descendants,
                m.recruiter_descendants,
                m.direct_lead_count,
                m.direct_recruiter_count,
                m.level,
            );
            hasher.update(line.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    fn at(&self, i: usize) -> NodeRef<'_> {
        NodeRef { forest: self, i }
    }
}

fn compute_stats(nodes: &[Node], orphans: usize) -> BuildStats {
    let mut stats = BuildStats {
        total: nodes.len(),
        orphans,
        ..BuildStats::default()
    };
    for node in nodes {
        if node.is_recruiter() {
            stats.recruiters += 1;
            if node.is_virtual {
                stats.virtual_recruiters += 1;
            }
        } else {
            stats.leads += 1;
        }
    }
    stats
}

/// Depth-first pre-order from `tops`, keeping display order.
#[must_use]
pub fn walk_from(tops: Vec<NodeRef<'_>>) -> Vec<(usize, NodeRef<'_>)> {
    let mut out = Vec::new();
    let mut stack: Vec<(usize, NodeRef<'_>)> = tops.into_iter().rev().map(|n| (0, n)).collect();
    while let Some((depth, node)) = stack.pop() {
        let children: Vec<NodeRef<'_>> = node.children().collect();
        stack.extend(children.into_iter().rev().map(|c| (depth + 1, c)));
        out.push((depth, node));
    }
    out
}

/// A borrowed handle on one node of a [`Forest`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    forest: &'a Forest,
    i: usize,
}

impl<'a> NodeRef<'a> {
    #[must_use]
    pub fn node(&self) -> &'a Node {
        &self.forest.nodes[self.i]
    }

    #[must_use]
    pub fn metrics(&self) -> &'a NodeMetrics {
        &self.forest.metrics[self.i]
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.node().id
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.forest.parents[self.i].map(|p| self.forest.at(p))
    }

    /// Children in display order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let forest = self.forest;
        forest.ranking.children[self.i]
            .iter()
            .map(move |&c| forest.at(c))
    }

    #[must_use]
    pub fn child_ids(&self) -> Vec<NodeId> {
        self.children().map(|c| c.id()).collect()
    }

    /// This node and everything below it, in display order.
    #[must_use]
    pub fn descendants(&self) -> Vec<(usize, NodeRef<'a>)> {
        walk_from(vec![*self])
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}

/// Deepest level nested in JSON output. A node at this depth is emitted
/// with empty `children` and its `childIds`; each cut-off child subtree is
/// listed again under the top-level `detached` key. This bounds recursion
/// on both the writing and the reading side: the deepest document stays
/// within serde_json's default read limit.
pub const JSON_NESTING_LIMIT: usize = 50;

/// A node serialized with its nested children, `depth` levels below the
/// top of its fragment.
struct Nested<'a> {
    node: NodeRef<'a>,
    depth: usize,
}

impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Repr<'a> {
            #[serde(flatten)]
            node: &'a Node,
            #[serde(flatten)]
            metrics: &'a NodeMetrics,
            children: Vec<Nested<'a>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            child_ids: Option<Vec<NodeId>>,
        }

        let (children, child_ids) = if self.depth >= JSON_NESTING_LIMIT {
            let ids = self.node.child_ids();
            (Vec::new(), Some(ids).filter(|ids| !ids.is_empty()))
        } else {
            let depth = self.depth + 1;
            let children = self.node.children().map(|node| Nested { node, depth }).collect();
            (children, None)
        };

        Repr {
            node: self.node.node(),
            metrics: self.node.metrics(),
            children,
            child_ids,
        }
        .serialize(serializer)
    }
}

fn fragments<'a>(tops: impl Iterator<Item = NodeRef<'a>>) -> Vec<Nested<'a>> {
    tops.map(|node| Nested { node, depth: 0 }).collect()
}

impl Forest {
    /// Subtrees that hang below a node at [`JSON_NESTING_LIMIT`], in display
    /// order. Fragments deeper than the limit are cut again.
    fn detached(&self) -> Vec<NodeRef<'_>> {
        let mut detached = Vec::new();
        let mut tops: Vec<NodeRef<'_>> = self.roots().chain(self.orphans()).collect();
        while !tops.is_empty() {
            let mut next = Vec::new();
            let mut stack: Vec<(usize, NodeRef<'_>)> =
                tops.into_iter().rev().map(|n| (0, n)).collect();
            while let Some((depth, node)) = stack.pop() {
                let children: Vec<NodeRef<'_>> = node.children().collect();
                if depth >= JSON_NESTING_LIMIT {
                    next.extend(children);
                } else {
                    stack.extend(children.into_iter().rev().map(|c| (depth + 1, c)));
                }
            }
            detached.extend(next.iter().copied());
            tops = next;
        }
        detached
    }
}

/// `{roots, orphans, stats, focus}` with nested children, plus `detached`
/// when the forest is deeper than [`JSON_NESTING_LIMIT`].
impl Serialize for Forest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Repr<'a> {
            roots: Vec<Nested<'a>>,
            orphans: Vec<Nested<'a>>,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            detached: Vec<Nested<'a>>,
            stats: BuildStats,
            focus: Option<&'a Focus>,
        }

        Repr {
            roots: fragments(self.roots()),
            orphans: fragments(self.orphans()),
            detached: fragments(self.detached().into_iter()),
            stats: self.stats,
            focus: self.focus.as_ref(),
        }
        .serialize(serializer)
    }
}
