//! Convert command implementation
//!
//! Turns an annotation dump (CoNLL column file, GENIA nested IOB, or a
//! BRAT directory) into the binary corpus file the analyze command reads.

use crate::corpus::{brat, conll, genia, store};
use crate::models::Corpus;
use anyhow::{bail, Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::info;

/// Progress bar style for per-file conversion
fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap()
        .progress_chars("█▓▒░  ")
}

pub fn run(from: &str, input: &Path, output: &Path, layer: &str) -> Result<()> {
    let corpus = match from {
        "conll" => {
            let data = std::fs::read_to_string(input)
                .with_context(|| format!("read {}", input.display()))?;
            conll::parse_str(&data, layer).context("parse CoNLL data")?
        }
        "genia" => {
            let data = std::fs::read_to_string(input)
                .with_context(|| format!("read {}", input.display()))?;
            genia::parse_str(&data, layer).context("parse GENIA data")?
        }
        "brat" => convert_brat(input, layer)?,
        other => bail!("unknown input format '{other}'"),
    };

    if corpus.is_empty() {
        bail!("{} contained no documents", input.display());
    }
    info!(
        documents = corpus.len(),
        tokens = corpus.token_count(),
        spans = corpus.span_count(),
        "conversion finished"
    );

    store::save(&corpus, output)?;
    eprintln!(
        "{} {} documents ({} tokens, {} spans) -> {}",
        style("Converted").green().bold(),
        corpus.len(),
        corpus.token_count(),
        corpus.span_count(),
        output.display()
    );
    Ok(())
}

/// BRAT directories can hold thousands of document pairs; show progress.
fn convert_brat(dir: &Path, layer: &str) -> Result<Corpus> {
    let pairs = brat::collect_pairs(dir)?;
    if pairs.is_empty() {
        bail!("{} contains no .txt files", dir.display());
    }

    let bar = ProgressBar::new(pairs.len() as u64);
    bar.set_style(bar_style());
    bar.set_message("converting BRAT documents");

    let mut documents = Vec::with_capacity(pairs.len());
    for (txt, ann) in &pairs {
        documents.push(brat::parse_pair_files(txt, ann, layer)?);
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(Corpus::new(documents))
}
