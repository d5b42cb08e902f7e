//! CLI command definitions and handlers

mod analyze;
mod convert;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate the boundary window size (>= 1)
fn parse_window(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("window must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// Spanprobe - span annotation statistics
///
/// 100% LOCAL - reads corpus files on disk, nothing leaves your machine.
#[derive(Parser, Debug)]
#[command(name = "spanprobe")]
#[command(
    version,
    about = "Span annotation statistics — estimate how learnable an annotation scheme is before training a model",
    long_about = "Spanprobe computes corpus-level statistics over span-annotated text: per-type \
span frequency, geometric-mean span length, and the KL-divergence distinctiveness of \
span-internal and span-boundary vocabulary against the corpus.\n\n\
These properties correlate with how well span-labeling models learn a scheme, so they \
are worth a look before any training run.\n\n\
Supported input formats: CoNLL-2000/2003 column files, GENIA nested IOB, BRAT standoff.",
    after_help = "\
Examples:
  spanprobe convert --from conll train.iob -o train.corpus   Build a corpus file
  spanprobe analyze train.corpus                             Metric tables on stdout
  spanprobe analyze train.corpus --verbose                   Include interpretation notes
  spanprobe analyze train.corpus --window 3                  Wider boundary windows
  spanprobe analyze train.corpus -f json -o report.json      Machine-readable report

Documentation: https://github.com/spanprobe/spanprobe"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a corpus file and report span statistics
    #[command(after_help = "\
Examples:
  spanprobe analyze train.corpus                     Text tables on stdout
  spanprobe analyze train.corpus --verbose           Explain each metric
  spanprobe analyze train.corpus -f json | jq .      JSON for scripting
  spanprobe analyze train.corpus -f json --compact   Single-line JSON
  spanprobe analyze train.corpus -w 2 -o report.txt  Window of 2, written to a file")]
    Analyze {
        /// Path to a corpus file produced by `spanprobe convert`
        corpus: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Boundary window size in tokens
        #[arg(long, short = 'w', default_value = "1", value_parser = parse_window, env = "SPANPROBE_WINDOW")]
        window: usize,

        /// Show interpretation notes for each metric (text format only)
        #[arg(long)]
        verbose: bool,

        /// Emit compact single-line JSON (json format only)
        #[arg(long)]
        compact: bool,
    },

    /// Convert an annotation dump into a binary corpus file
    #[command(after_help = "\
Examples:
  spanprobe convert --from conll conll2003.train -o conll.corpus
  spanprobe convert --from genia genia.train.iob2 -o genia.corpus
  spanprobe convert --from brat  ./riqua/merged/   -o riqua.corpus
  spanprobe convert --from conll tags.iob --layer entities -o tagged.corpus")]
    Convert {
        /// Input format: conll, genia, brat
        #[arg(long, value_parser = ["conll", "genia", "brat"])]
        from: String,

        /// Input file (conll, genia) or directory of .txt/.ann pairs (brat)
        input: PathBuf,

        /// Output corpus file
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Span layer the decoded annotations land in
        #[arg(long, default_value = "sc")]
        layer: String,
    },
}

/// Dispatch a parsed CLI invocation.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            corpus,
            format,
            output,
            window,
            verbose,
            compact,
        } => analyze::run(&corpus, &format, output.as_deref(), window, verbose, compact),
        Commands::Convert {
            from,
            input,
            output,
            layer,
        } => convert::run(&from, &input, &output, &layer),
    }
}
