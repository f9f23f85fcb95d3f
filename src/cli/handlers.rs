// src/cli/handlers.rs
use anyhow::{Context, Result};
use colored::Colorize;

use super::args::{InputArgs, OutputFormat, TreeArgs};
use crate::config::Config;
use crate::error::RefnetError;
use crate::network::{Forest, NetworkEngine};
use crate::reporting;
use crate::source;

/// Loads both snapshots and builds the forest.
///
/// # Errors
/// Returns error if either snapshot cannot be loaded.
pub fn build_forest(config: &Config, input: &InputArgs, focus: Option<&str>) -> Result<Forest> {
    let records = source::load_records(&input.records)
        .with_context(|| format!("loading records from {}", input.records.display()))?;
    let directory = match &input.directory {
        Some(path) => source::load_directory(path)
            .with_context(|| format!("loading directory from {}", path.display()))?,
        None => Vec::new(),
    };
    Ok(NetworkEngine::build(&records, &directory, &config.network, focus))
}

/// # Errors
/// Returns error on snapshot failures, or when `require_focus` is set and the
/// focus target does not resolve.
pub fn handle_tree(config: &Config, args: &TreeArgs) -> Result<()> {
    let forest = build_forest(config, &args.input, args.focus.as_deref())?;

    if let Some(query) = &args.focus {
        if forest.focus().is_none() {
            if args.require_focus {
                return Err(RefnetError::FocusNotFound(query.clone()).into());
            }
            eprintln!(
                "{}",
                format!("focus '{query}' not found; showing the full network").yellow()
            );
        }
    }

    match args.format {
        OutputFormat::Json => println!("{}", reporting::to_json(&forest, true)?),
        OutputFormat::Text => {
            let mut display = config.display.clone();
            if args.depth.is_some() {
                display.max_depth = args.depth;
            }
            print!("{}", reporting::render_focus(&forest, &display));
        }
    }
    Ok(())
}

/// # Errors
/// Returns error if snapshots cannot be loaded.
pub fn handle_stats(config: &Config, input: &InputArgs, json: bool) -> Result<()> {
    let forest = build_forest(config, input, None)?;
    if json {
        let value = serde_json::json!({
            "stats": forest.stats(),
            "fingerprint": forest.fingerprint(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", reporting::render_summary(&forest));
    }
    Ok(())
}

/// # Errors
/// Returns error if the target is blank, snapshots cannot be loaded, or the
/// target does not resolve.
pub fn handle_path(config: &Config, input: &InputArgs, target: &str) -> Result<()> {
    if target.trim().is_empty() {
        return Err(RefnetError::InvalidInput("path target is empty".to_string()).into());
    }
    let forest = build_forest(config, input, Some(target))?;
    let focus = forest
        .focus()
        .ok_or_else(|| RefnetError::FocusNotFound(target.to_string()))?;

    for (depth, id) in focus.path.iter().enumerate() {
        let name = forest.node(*id).map_or("?", |n| n.name());
        println!("{}{} {}", "  ".repeat(depth), id.to_string().dimmed(), name);
    }
    Ok(())
}
