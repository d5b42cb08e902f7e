//! Spanprobe - span annotation statistics CLI
//!
//! Computes corpus-level statistics over span-annotated text to estimate
//! how learnable an annotation scheme is before any model is trained.

use anyhow::Result;
use clap::Parser;
use spanprobe::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // RUST_LOG wins over the --log-level flag
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.clone()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(args)
}
