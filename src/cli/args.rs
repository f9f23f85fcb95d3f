use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "refnet", version, about = "Referral network tree builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Config file (defaults to ./refnet.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build and render the referral forest
    Tree {
        #[command(flatten)]
        input: InputArgs,
        /// Node id or referral code to focus on
        #[arg(long, short, value_name = "ID|CODE")]
        focus: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Fail instead of falling back to the full view when the focus misses
        #[arg(long)]
        require_focus: bool,
        /// Limit rendered depth (overrides config)
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Print network statistics and the build fingerprint
    Stats {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        json: bool,
    },
    /// Print the root-to-node path for a node id or referral code
    Path {
        #[arg(value_name = "ID|CODE")]
        target: String,
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON export of enrollment/recruiter records
    #[arg(long, short, value_name = "FILE")]
    pub records: PathBuf,
    /// JSON export of the configured recruiter directory
    #[arg(long, short, value_name = "FILE")]
    pub directory: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the tree command (used by handlers)
#[derive(Debug, Clone)]
pub struct TreeArgs {
    pub input: InputArgs,
    pub focus: Option<String>,
    pub format: OutputFormat,
    pub require_focus: bool,
    pub depth: Option<usize>,
}
