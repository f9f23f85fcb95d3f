// src/bin/refnet.rs
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use refnet_core::cli::{self, Cli};
use refnet_core::exit::RefnetExit;

fn main() -> RefnetExit {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli).into()
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli::resolve_config(cli)?;
    cli::dispatch(cli, &config)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "refnet_core=debug" } else { "refnet_core=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
