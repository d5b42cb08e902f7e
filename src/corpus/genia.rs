//! GENIA nested-IOB converter
//!
//! GENIA ships as tab-separated blocks: the token in the first column and
//! one IOB tag column per nesting level (four in the published training
//! split). Each level is decoded independently with the plain IOB decoder
//! and the resulting spans are merged into a single layer - duplicates
//! included, since a mention annotated at two levels is two annotations.

use super::conll::decode_iob;
use crate::models::{Corpus, Document, Span, Token};
use anyhow::{bail, Result};
use std::collections::BTreeMap;

/// Parse GENIA-style nested IOB data into a corpus, merging all nesting
/// levels into `layer`. The level count is taken from the first token line.
pub fn parse_str(data: &str, layer: &str) -> Result<Corpus> {
    let mut documents = Vec::new();

    for block in data.split("\n\n") {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty() && !line.starts_with("-DOCSTART-"))
            .collect();
        if lines.is_empty() {
            continue;
        }

        let levels = lines[0].split('\t').count().saturating_sub(1);
        if levels == 0 {
            bail!("expected token plus at least one tag column, got: {:?}", lines[0]);
        }

        let mut words: Vec<String> = Vec::with_capacity(lines.len());
        let mut tag_columns: Vec<Vec<String>> = vec![Vec::with_capacity(lines.len()); levels];
        for line in &lines {
            let mut columns = line.split('\t');
            let Some(word) = columns.next() else {
                continue;
            };
            words.push(word.to_string());
            for tags in tag_columns.iter_mut() {
                tags.push(columns.next().unwrap_or("O").to_string());
            }
        }

        let mut spans: Vec<Span> = Vec::new();
        for tags in &tag_columns {
            spans.extend(decode_iob(tags.as_slice()));
        }

        let tokens: Vec<Token> = words
            .into_iter()
            .enumerate()
            .map(|(position, text)| Token { text, position })
            .collect();
        let mut layers = BTreeMap::new();
        layers.insert(layer.to_string(), spans);
        documents.push(Document { tokens, layers });
    }

    Ok(Corpus::new(documents))
}
