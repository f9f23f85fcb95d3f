// src/reporting/tree.rs
//! Text tree rendering.

use std::fmt::Write;

use colored::Colorize;

use crate::config::DisplayConfig;
use crate::network::{Forest, NodeRef};

struct Frame<'a> {
    node: NodeRef<'a>,
    prefix: String,
    is_last: bool,
    depth: usize,
}

/// Renders every root tree followed by the orphan list.
#[must_use]
pub fn render_forest(forest: &Forest, display: &DisplayConfig) -> String {
    let mut out = String::new();

    let roots: Vec<NodeRef<'_>> = forest.roots().collect();
    if roots.is_empty() {
        let _ = writeln!(out, "{}", "(no recruiter tree)".dimmed());
    }
    for root in roots {
        render_tree(&mut out, root, display);
        let _ = writeln!(out);
    }

    let orphans: Vec<NodeRef<'_>> = forest.orphans().collect();
    if !orphans.is_empty() {
        let _ = writeln!(out, "{}", format!("Unlinked leads ({})", orphans.len()).yellow().bold());
        for orphan in orphans {
            render_tree(&mut out, orphan, display);
        }
    }

    out
}

/// Renders the ancestor breadcrumb and the focused subtree. Falls back to
/// the full forest when no focus is set.
#[must_use]
pub fn render_focus(forest: &Forest, display: &DisplayConfig) -> String {
    let (Some(focus), Some(subtree)) = (forest.focus(), forest.subtree()) else {
        return render_forest(forest, display);
    };

    let crumbs: Vec<String> = focus
        .path
        .iter()
        .filter_map(|id| forest.node(*id))
        .map(|n| n.name().to_string())
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Focus:".cyan().bold(), crumbs.join(" › "));
    let _ = writeln!(out);
    render_tree(&mut out, subtree, display);
    out
}

fn render_tree(out: &mut String, top: NodeRef<'_>, display: &DisplayConfig) {
    let _ = writeln!(out, "{}", node_line(top, display).bold());
    if display.max_depth == Some(0) {
        return;
    }

    let mut stack = child_frames(top, "", 1);
    while let Some(frame) = stack.pop() {
        let connector = if frame.is_last { "└── " } else { "├── " };
        let _ = writeln!(out, "{}{connector}{}", frame.prefix, node_line(frame.node, display));

        let next_prefix = format!("{}{}", frame.prefix, if frame.is_last { "    " } else { "│   " });
        if display.max_depth.is_some_and(|max| frame.depth >= max) {
            let hidden = frame.node.metrics().total_descendants;
            if hidden > 0 {
                let _ = writeln!(out, "{next_prefix}{}", format!("… {hidden} more").dimmed());
            }
            continue;
        }
        stack.extend(child_frames(frame.node, &next_prefix, frame.depth + 1));
    }
}

/// Frames for `parent`'s children, reversed so the stack pops them in order.
fn child_frames<'a>(parent: NodeRef<'a>, prefix: &str, depth: usize) -> Vec<Frame<'a>> {
    let children: Vec<NodeRef<'a>> = parent.children().collect();
    let last = children.len().saturating_sub(1);
    children
        .into_iter()
        .enumerate()
        .rev()
        .map(|(i, node)| Frame {
            node,
            prefix: prefix.to_string(),
            is_last: i == last,
            depth,
        })
        .collect()
}

fn node_line(node: NodeRef<'_>, display: &DisplayConfig) -> String {
    let n = node.node();
    let mut line = if n.is_virtual {
        n.name.dimmed().italic().to_string()
    } else {
        n.name.clone()
    };

    let tag = match &n.code {
        Some(code) => format!("{} {code}", n.kind.label()),
        None => n.kind.label().to_string(),
    };
    let _ = write!(line, " {}", format!("({tag})").blue());

    if display.show_metrics {
        let m = node.metrics();
        let _ = write!(
            line,
            " {}",
            format!(
                "[direct {} · total {} · L{}]",
                m.direct_total(),
                m.total_descendants,
                m.level
            )
            .dimmed()
        );
    }
    if display.show_contacts {
        let contact: Vec<&str> = [n.phone.as_deref(), n.city.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !contact.is_empty() {
            let _ = write!(line, " {}", contact.join(", ").dimmed());
        }
    }
    if n.attended {
        let _ = write!(line, " {}", "✓ attended".green());
    }
    if n.duplicate {
        let _ = write!(line, " {}", "duplicate".yellow());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::network::NetworkEngine;
    use crate::types::SourceRecord;

    fn forest() -> Forest {
        let recs: Vec<SourceRecord> = serde_json::from_value(serde_json::json!([
            {"id": 1, "kind": "recruiter", "code": "01", "name": "Root"},
            {"id": 2, "kind": "recruiter", "code": "02", "parent_code": "01", "name": "Alpha"},
            {"id": 3, "kind": "lead", "parent_code": "02", "name": "Lia"},
            {"id": 4, "kind": "lead", "parent_code": "01", "name": "Bo"}
        ]))
        .unwrap();
        NetworkEngine::build(&recs, &[], &NetworkConfig::default(), None)
    }

    #[test]
    fn test_connectors_follow_display_order() {
        colored::control::set_override(false);
        let out = render_forest(&forest(), &DisplayConfig::default());
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("Root"));
        assert!(lines[1].starts_with("├── Alpha"));
        assert!(lines[2].starts_with("│   └── Lia"));
        assert!(lines[3].starts_with("└── Bo"));
    }

    #[test]
    fn test_depth_cutoff_summarizes_hidden_nodes() {
        colored::control::set_override(false);
        let display = DisplayConfig {
            max_depth: Some(1),
            ..DisplayConfig::default()
        };
        let out = render_forest(&forest(), &display);

        assert!(!out.contains("Lia"));
        assert!(out.contains("… 1 more"));
    }
}
