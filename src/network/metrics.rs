// src/network/metrics.rs
//! Subtree aggregation.
//!
//! Both walks use explicit stacks; referral chains can be arbitrarily deep.

use super::assemble::Assembly;
use crate::types::NodeMetrics;

/// Computes descendant counts, direct-child counts and resolved levels for
/// every node. The result is indexed like `assembly.nodes`.
#[must_use]
pub fn compute(assembly: &Assembly) -> Vec<NodeMetrics> {
    let mut metrics = vec![NodeMetrics::default(); assembly.len()];
    let order = preorder(assembly);

    assign_levels(assembly, &order, &mut metrics);
    aggregate(assembly, &order, &mut metrics);

    metrics
}

/// Pre-order over every tree, tops first. Every node appears exactly once
/// because each node is either top-level or has exactly one parent.
fn preorder(assembly: &Assembly) -> Vec<usize> {
    let mut order = Vec::with_capacity(assembly.len());
    let mut stack: Vec<usize> = assembly
        .roots
        .iter()
        .chain(&assembly.orphans)
        .rev()
        .copied()
        .collect();

    while let Some(i) = stack.pop() {
        order.push(i);
        stack.extend(assembly.children[i].iter().rev().copied());
    }
    order
}

/// A known level from the source record is kept; otherwise parent + 1, or 0
/// at the top.
fn assign_levels(assembly: &Assembly, order: &[usize], metrics: &mut [NodeMetrics]) {
    for &i in order {
        let derived = match assembly.parents[i] {
            Some(p) => metrics[p].level.saturating_add(1),
            None => 0,
        };
        metrics[i].level = assembly.nodes[i].level.unwrap_or(derived);
    }
}

/// Reverse pre-order visits every child before its parent.
fn aggregate(assembly: &Assembly, order: &[usize], metrics: &mut [NodeMetrics]) {
    for &i in order.iter().rev() {
        let mut acc = metrics[i];
        for &c in &assembly.children[i] {
            let child = metrics[c];
            acc.total_descendants += 1 + child.total_descendants;
            acc.lead_descendants += child.lead_descendants;
            acc.recruiter_descendants += child.recruiter_descendants;
            if assembly.nodes[c].is_recruiter() {
                acc.recruiter_descendants += 1;
                acc.direct_recruiter_count += 1;
            } else {
                acc.lead_descendants += 1;
                acc.direct_lead_count += 1;
            }
        }
        metrics[i] = acc;
    }
}
