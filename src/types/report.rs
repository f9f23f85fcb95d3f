// src/types/report.rs
//! Summary types handed to presentation.

use serde::Serialize;

use super::node::NodeId;

/// Counts over the whole materialized set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStats {
    pub total: usize,
    pub leads: usize,
    /// Includes virtual recruiters.
    pub recruiters: usize,
    pub virtual_recruiters: usize,
    pub orphans: usize,
}

/// A resolved subtree-focus target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Focus {
    pub code: Option<String>,
    pub name: String,
    pub node_id: NodeId,
    /// Ids from the topmost ancestor down to the focused node, inclusive.
    pub path: Vec<NodeId>,
}
