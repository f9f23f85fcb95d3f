pub mod args;
pub mod handlers;

pub use self::args::{Cli, Commands, InputArgs, OutputFormat, TreeArgs};
pub use self::handlers::{build_forest, handle_path, handle_stats, handle_tree};

use anyhow::Result;

use crate::config::Config;

/// Resolves the effective config: an explicit `--config` file must load,
/// the implicit local file is best effort.
///
/// # Errors
/// Returns error if an explicit config file cannot be read or parsed.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    Ok(match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    })
}

/// # Errors
/// Propagates handler failures.
pub fn dispatch(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Tree {
            input,
            focus,
            format,
            require_focus,
            depth,
        } => handle_tree(
            config,
            &TreeArgs {
                input: input.clone(),
                focus: focus.clone(),
                format: *format,
                require_focus: *require_focus,
                depth: *depth,
            },
        ),
        Commands::Stats { input, json } => handle_stats(config, input, *json),
        Commands::Path { target, input } => handle_path(config, input, target),
    }
}
