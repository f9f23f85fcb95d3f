// src/types/node.rs
//! The uniform node shape every pipeline stage works on.

use std::fmt;

use serde::Serialize;

/// Node identity.
///
/// Real records keep their own ids. Placeholder nodes live in a reserved
/// negative range so the two can never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl NodeId {
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Recruiter,
    Lead,
}

impl NodeKind {
    #[must_use]
    pub fn is_recruiter(self) -> bool {
        matches!(self, Self::Recruiter)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Recruiter => "recruiter",
            Self::Lead => "lead",
        }
    }
}

/// A materialized enrollee or recruiter.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    /// Own referral code, two-digit normalized. Recruiters only.
    pub code: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    /// Directory link, when the code is listed in the recruiter directory.
    pub url: Option<String>,
    /// Depth hint carried over from the source record.
    #[serde(rename = "levelHint")]
    pub level: Option<u32>,
    pub parent_id: Option<NodeId>,
    pub parent_code: Option<String>,
    pub is_virtual: bool,
    /// Matched against a live-session attendance log upstream.
    pub attended: bool,
    /// Flagged as a duplicate submission upstream.
    pub duplicate: bool,
}

impl Node {
    #[must_use]
    pub fn is_recruiter(&self) -> bool {
        self.kind.is_recruiter()
    }
}

/// Aggregates computed over a node's subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetrics {
    pub total_descendants: usize,
    pub lead_descendants: usize,
    pub recruiter_descendants: usize,
    pub direct_lead_count: usize,
    pub direct_recruiter_count: usize,
    /// Resolved depth: the source hint when present, otherwise parent + 1.
    pub level: u32,
}

impl NodeMetrics {
    /// Referrals this node brought in personally.
    #[must_use]
    pub fn direct_total(&self) -> usize {
        self.direct_lead_count + self.direct_recruiter_count
    }
}
