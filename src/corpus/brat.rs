//! BRAT standoff converter
//!
//! Reads `.txt`/`.ann` pairs. Entity lines (`T` prefix) carry a label and
//! character offsets into the text file; offsets are aligned to the token
//! boundaries produced by [`tokenize::segment`]. Annotations that do not
//! land exactly on token boundaries are skipped with a warning rather than
//! failing the whole conversion - standoff dumps routinely contain a few
//! such annotations, and dropping them mirrors strict character-span
//! alignment in other tooling.
//!
//! Relation, event and attribute lines are ignored; only entities become
//! spans.

use super::tokenize::{self, OffsetToken};
use crate::models::{Corpus, Document, Span, Token};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One entity annotation parsed from an `.ann` file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entity {
    label: String,
    start: usize,
    end: usize,
}

/// Parse the entity (`T`) lines of an `.ann` file. Discontinuous spans
/// (offset lists with `;`) are skipped with a warning.
fn parse_entities(ann: &str, source: &str) -> Vec<Entity> {
    let mut entities = Vec::new();
    for line in ann.lines() {
        if !line.starts_with('T') {
            continue;
        }
        let mut fields = line.split('\t');
        let _id = fields.next();
        let Some(descriptor) = fields.next() else {
            warn!(source, line, "entity line without a descriptor field");
            continue;
        };
        if descriptor.contains(';') {
            warn!(source, line, "skipping discontinuous annotation");
            continue;
        }
        let mut parts = descriptor.split_whitespace();
        let (Some(label), Some(start), Some(end)) = (parts.next(), parts.next(), parts.next())
        else {
            warn!(source, line, "malformed entity descriptor");
            continue;
        };
        let (Ok(start), Ok(end)) = (start.parse::<usize>(), end.parse::<usize>()) else {
            warn!(source, line, "non-numeric entity offsets");
            continue;
        };
        entities.push(Entity {
            label: label.to_string(),
            start,
            end,
        });
    }
    entities
}

/// Map a character range onto token indices. Both edges must coincide with
/// token boundaries.
fn align(tokens: &[OffsetToken], start: usize, end: usize) -> Option<(usize, usize)> {
    let first = tokens.iter().position(|t| t.start == start)?;
    let last = tokens.iter().position(|t| t.end == end)?;
    (first <= last).then_some((first, last + 1))
}

/// Convert one text + annotation pair into a document, decoding entities
/// into `layer`.
pub fn parse_pair(text: &str, ann: &str, layer: &str, source: &str) -> Document {
    let offset_tokens = tokenize::segment(text);
    let mut spans = Vec::new();
    for entity in parse_entities(ann, source) {
        match align(&offset_tokens, entity.start, entity.end) {
            Some((start, end)) => spans.push(Span::new(entity.label, start, end)),
            None => warn!(
                source,
                label = %entity.label,
                start = entity.start,
                end = entity.end,
                "annotation does not align to token boundaries, skipping"
            ),
        }
    }

    let tokens: Vec<Token> = offset_tokens
        .into_iter()
        .enumerate()
        .map(|(position, t)| Token {
            text: t.text,
            position,
        })
        .collect();
    let mut layers = BTreeMap::new();
    layers.insert(layer.to_string(), spans);
    Document { tokens, layers }
}

/// Collect the `.txt` files of a BRAT directory with their sibling `.ann`
/// paths, sorted for deterministic corpus order.
pub fn collect_pairs(dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut pairs = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("txt") {
            let ann = path.with_extension("ann");
            pairs.push((path, ann));
        }
    }
    pairs.sort();
    Ok(pairs)
}

/// Convert one `.txt`/`.ann` pair read from disk. A missing `.ann` file
/// yields a document without annotations.
pub fn parse_pair_files(txt: &Path, ann: &Path, layer: &str) -> Result<Document> {
    let text =
        fs::read_to_string(txt).with_context(|| format!("read text file {}", txt.display()))?;
    let annotations = if ann.exists() {
        fs::read_to_string(ann)
            .with_context(|| format!("read annotation file {}", ann.display()))?
    } else {
        warn!(path = %ann.display(), "no annotation file, document will carry no spans");
        String::new()
    };
    Ok(parse_pair(
        &text,
        &annotations,
        layer,
        &txt.display().to_string(),
    ))
}

/// Convert a whole BRAT directory into a corpus.
pub fn parse_dir(dir: &Path, layer: &str) -> Result<Corpus> {
    let mut documents = Vec::new();
    for (txt, ann) in collect_pairs(dir)? {
        documents.push(parse_pair_files(&txt, &ann, layer)?);
    }
    Ok(Corpus::new(documents))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "The drug aspirin reduces pain.";

    #[test]
    fn entities_become_token_spans() {
        let ann = "T1\tDRUG 9 16\taspirin\n";
        let doc = parse_pair(TEXT, ann, "sc", "test");
        assert_eq!(doc.layers["sc"], vec![Span::new("DRUG", 2, 3)]);
        assert_eq!(doc.tokens[2].text, "aspirin");
    }

    #[test]
    fn multi_token_entities_align() {
        let ann = "T1\tEFFECT 17 29\treduces pain\n";
        let doc = parse_pair(TEXT, ann, "sc", "test");
        assert_eq!(doc.layers["sc"], vec![Span::new("EFFECT", 3, 5)]);
    }

    #[test]
    fn misaligned_annotations_are_skipped() {
        // Offsets land mid-token
        let ann = "T1\tDRUG 9 13\taspi\n";
        let doc = parse_pair(TEXT, ann, "sc", "test");
        assert!(doc.layers["sc"].is_empty());
    }

    #[test]
    fn discontinuous_annotations_are_skipped() {
        let ann = "T1\tDRUG 0 3;9 16\tThe aspirin\n";
        let doc = parse_pair(TEXT, ann, "sc", "test");
        assert!(doc.layers["sc"].is_empty());
    }

    #[test]
    fn non_entity_lines_are_ignored() {
        let ann = "T1\tDRUG 9 16\taspirin\nR1\tTreats Arg1:T1 Arg2:T2\n#1\tAnnotatorNotes T1\tchecked\n";
        let doc = parse_pair(TEXT, ann, "sc", "test");
        assert_eq!(doc.layers["sc"].len(), 1);
    }

    #[test]
    fn directory_conversion_pairs_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.txt"), TEXT).expect("write txt");
        fs::write(dir.path().join("a.ann"), "T1\tDRUG 9 16\taspirin\n").expect("write ann");
        fs::write(dir.path().join("b.txt"), "No annotations here.").expect("write txt");

        let corpus = parse_dir(dir.path(), "sc").expect("parse dir");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.documents[0].layers["sc"].len(), 1);
        assert!(corpus.documents[1].layers["sc"].is_empty());
    }
}
