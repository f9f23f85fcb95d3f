// src/types/mod.rs
//! Common data structures shared across the network pipeline.

pub mod node;
pub mod record;
pub mod report;

pub use self::node::{Node, NodeId, NodeKind, NodeMetrics};
pub use self::record::{DirectoryEntry, SourceRecord};
pub use self::report::{BuildStats, Focus};
