// src/network/mod.rs
//! Referral-network construction: flat records in, ranked forest out.
//!
//! Stages run strictly in sequence and each returns a new structure:
//! [`materialize`] -> [`assemble`] -> [`metrics`] -> [`ranking`].

pub mod assemble;
pub mod codes;
pub mod focus;
pub mod forest;
pub mod materialize;
pub mod metrics;
pub mod ranking;

pub use forest::{Forest, NodeRef, JSON_NESTING_LIMIT};

use crate::config::NetworkConfig;
use crate::types::{DirectoryEntry, SourceRecord};

/// Orchestrates materialization, assembly and ranking.
pub struct NetworkEngine;

impl NetworkEngine {
    /// Builds the ranked forest for one snapshot. Pure and infallible:
    /// malformed input degrades instead of failing the build.
    #[must_use]
    pub fn build(
        records: &[SourceRecord],
        directory: &[DirectoryEntry],
        config: &NetworkConfig,
        focus: Option<&str>,
    ) -> Forest {
        let nodes = materialize::materialize(records, directory, config);
        let assembly = assemble::assemble(nodes, &config.normalized_root_codes());
        let node_metrics = metrics::compute(&assembly);
        let order = ranking::rank(&assembly, &node_metrics);
        let mut forest = Forest::new(assembly, node_metrics, order);

        if let Some(query) = focus {
            Self::focus_on(&mut forest, query);
        }
        forest
    }

    /// Points the forest at a new focus target without rebuilding it.
    /// Returns whether the target resolved.
    pub fn focus_on(forest: &mut Forest, query: &str) -> bool {
        forest.set_focus(query)
    }
}
