// src/reporting/mod.rs
//! Presentation of a built forest: box-drawn text tree, summary, JSON.

pub mod json;
pub mod summary;
pub mod tree;

pub use self::json::to_json;
pub use self::summary::render_summary;
pub use self::tree::{render_focus, render_forest};
