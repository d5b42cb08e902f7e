//! CoNLL column-file converter
//!
//! Parses CoNLL-2000/2003-style dumps: one token per line with
//! whitespace-separated columns, the IOB tag in the last column, blank
//! lines separating sentences and optional `-DOCSTART-` lines separating
//! documents. Decoded entity spans land in a single configurable layer
//! (conventionally `"sc"`).
//!
//! When the dump carries no `-DOCSTART-` delimiters every sentence becomes
//! its own document, which matches how the row-per-sentence exports of
//! these datasets are distributed.

use crate::models::{Corpus, Document, Span, Token};
use anyhow::{bail, Result};
use std::collections::BTreeMap;

/// Decode an IOB tag sequence into labeled spans.
///
/// `B-X` opens a span, `I-X` extends a span of the same label (or opens one
/// leniently after `O` or a different label, tolerating IOB1-style input),
/// `O` closes. Tags without a `B-`/`I-` prefix open a fresh span of that
/// bare label.
pub(crate) fn decode_iob<S: AsRef<str>>(tags: &[S]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut open: Option<(String, usize)> = None;

    for (idx, tag) in tags.iter().enumerate() {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || tag == "O" {
            if let Some((label, start)) = open.take() {
                spans.push(Span::new(label, start, idx));
            }
            continue;
        }

        let (prefix, label) = match tag.split_once('-') {
            Some((p, l)) => (p, l),
            None => ("B", tag),
        };

        let continues = prefix == "I"
            && matches!(&open, Some((current, _)) if current == label);
        if !continues {
            if let Some((prev, start)) = open.take() {
                spans.push(Span::new(prev, start, idx));
            }
            open = Some((label.to_string(), idx));
        }
    }

    if let Some((label, start)) = open {
        spans.push(Span::new(label, start, tags.len()));
    }
    spans
}

/// Parse CoNLL column data into a corpus, decoding spans into `layer`.
pub fn parse_str(data: &str, layer: &str) -> Result<Corpus> {
    let has_docstart = data
        .lines()
        .any(|line| line.trim_start().starts_with("-DOCSTART-"));

    let mut documents = Vec::new();
    let mut doc_tokens: Vec<Token> = Vec::new();
    let mut doc_spans: Vec<Span> = Vec::new();
    let mut sent_words: Vec<String> = Vec::new();
    let mut sent_tags: Vec<String> = Vec::new();

    fn flush_sentence(
        doc_tokens: &mut Vec<Token>,
        doc_spans: &mut Vec<Span>,
        words: &mut Vec<String>,
        tags: &mut Vec<String>,
    ) {
        if words.is_empty() {
            return;
        }
        let offset = doc_tokens.len();
        for span in decode_iob(tags.as_slice()) {
            doc_spans.push(Span {
                label: span.label,
                start: span.start + offset,
                end: span.end + offset,
            });
        }
        for word in words.drain(..) {
            let position = doc_tokens.len();
            doc_tokens.push(Token::new(word, position));
        }
        tags.clear();
    }

    fn flush_document(
        documents: &mut Vec<Document>,
        layer: &str,
        tokens: &mut Vec<Token>,
        spans: &mut Vec<Span>,
    ) {
        if tokens.is_empty() {
            return;
        }
        let mut layers = BTreeMap::new();
        layers.insert(layer.to_string(), std::mem::take(spans));
        documents.push(Document {
            tokens: std::mem::take(tokens),
            layers,
        });
    }

    for (line_no, line) in data.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with("-DOCSTART-") {
            flush_sentence(&mut doc_tokens, &mut doc_spans, &mut sent_words, &mut sent_tags);
            flush_document(&mut documents, layer, &mut doc_tokens, &mut doc_spans);
            continue;
        }
        if trimmed.is_empty() {
            flush_sentence(&mut doc_tokens, &mut doc_spans, &mut sent_words, &mut sent_tags);
            if !has_docstart {
                flush_document(&mut documents, layer, &mut doc_tokens, &mut doc_spans);
            }
            continue;
        }

        let mut columns = trimmed.split_whitespace();
        let Some(word) = columns.next() else {
            continue;
        };
        let tag = match columns.last() {
            Some(tag) => tag,
            None => bail!("line {}: expected at least two columns, got one", line_no + 1),
        };
        sent_words.push(word.to_string());
        sent_tags.push(tag.to_string());
    }

    flush_sentence(&mut doc_tokens, &mut doc_spans, &mut sent_words, &mut sent_tags);
    flush_document(&mut documents, layer, &mut doc_tokens, &mut doc_spans);

    Ok(Corpus::new(documents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_iob_runs() {
        let spans = decode_iob(&["O", "B-PER", "I-PER", "O", "B-LOC"]);
        assert_eq!(
            spans,
            vec![Span::new("PER", 1, 3), Span::new("LOC", 4, 5)]
        );
    }

    #[test]
    fn fresh_b_tag_starts_a_new_span() {
        let spans = decode_iob(&["B-PER", "B-PER", "I-PER"]);
        assert_eq!(
            spans,
            vec![Span::new("PER", 0, 1), Span::new("PER", 1, 3)]
        );
    }

    #[test]
    fn label_change_inside_i_run_splits() {
        let spans = decode_iob(&["B-PER", "I-LOC"]);
        assert_eq!(
            spans,
            vec![Span::new("PER", 0, 1), Span::new("LOC", 1, 2)]
        );
    }

    #[test]
    fn dangling_run_closes_at_the_end() {
        let spans = decode_iob(&["O", "B-ORG", "I-ORG"]);
        assert_eq!(spans, vec![Span::new("ORG", 1, 3)]);
    }

    #[test]
    fn sentences_become_documents_without_docstart() {
        let data = "\
The O
drug O
aspirin B-DRUG
. O

It O
works O
. O
";
        let corpus = parse_str(data, "sc").expect("parse");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.documents[0].len(), 4);
        assert_eq!(
            corpus.documents[0].layers["sc"],
            vec![Span::new("DRUG", 2, 3)]
        );
        assert!(corpus.documents[1].layers["sc"].is_empty());
    }

    #[test]
    fn docstart_groups_sentences_into_documents() {
        let data = "\
-DOCSTART- -X- O O
Aspirin B-DRUG
helps O
.       O

So O
does O
ibuprofen B-DRUG
. O

-DOCSTART- -X- O O
Unrelated O
text O
";
        let corpus = parse_str(data, "sc").expect("parse");
        assert_eq!(corpus.len(), 2);
        // First document: both sentences, offsets carried across
        let doc = &corpus.documents[0];
        assert_eq!(doc.len(), 8);
        assert_eq!(
            doc.layers["sc"],
            vec![Span::new("DRUG", 0, 1), Span::new("DRUG", 6, 7)]
        );
        assert_eq!(corpus.documents[1].len(), 2);
    }

    #[test]
    fn uses_the_last_column_as_the_tag() {
        let data = "Aspirin NNP B-NP B-DRUG\n";
        let corpus = parse_str(data, "sc").expect("parse");
        assert_eq!(
            corpus.documents[0].layers["sc"],
            vec![Span::new("DRUG", 0, 1)]
        );
    }

    #[test]
    fn single_column_lines_are_an_error() {
        assert!(parse_str("orphan\n", "sc").is_err());
    }
}
