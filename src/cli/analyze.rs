//! Analyze command implementation
//!
//! Loads a corpus file, runs the span analyzer, and renders the report:
//! styled metric tables for humans or the frozen JSON artifact for
//! machines.

use crate::analysis::{AnalyzerConfig, SpanAnalyzer};
use crate::corpus::store;
use crate::reporters;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;
use tracing::info;

pub fn run(
    corpus_path: &Path,
    format: &str,
    output: Option<&Path>,
    window: usize,
    verbose: bool,
    compact: bool,
) -> Result<()> {
    let corpus = store::load(corpus_path)?;
    info!(
        documents = corpus.len(),
        tokens = corpus.token_count(),
        spans = corpus.span_count(),
        "corpus loaded"
    );
    if format == "text" && output.is_none() {
        eprintln!(
            "{} {} documents, {} tokens, {} spans from {}",
            style("Loaded").green().bold(),
            corpus.len(),
            corpus.token_count(),
            corpus.span_count(),
            corpus_path.display()
        );
    }

    let analyzer = SpanAnalyzer::new(&corpus, AnalyzerConfig { window_size: window })
        .context("corpus failed validation")?;
    let report = analyzer.analyze().context("analysis failed")?;

    let rendered = match format {
        "json" => {
            if compact {
                reporters::json::render_compact(&report)?
            } else {
                reporters::json::render(&report)?
            }
        }
        _ => reporters::text::render(&report, verbose)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes())
                .with_context(|| format!("write report to {}", path.display()))?;
            eprintln!(
                "{} report written to {}",
                style("Done:").green().bold(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
