// src/reporting/json.rs
use crate::network::Forest;

/// Serializes the forest as `{roots, orphans, stats, focus}`.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json(forest: &Forest, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(forest)
    } else {
        serde_json::to_string(forest)
    }
}
