//! Span grouping and boundary-window extraction
//!
//! Groups a layer's spans by type across the whole corpus and pulls out the
//! tokens inside each span and the tokens in a window around its edges.
//! Windows clip silently at document edges: a span starting at token 0
//! contributes no left-boundary tokens, one ending at the last token no
//! right-boundary tokens.

use crate::models::{Corpus, Document, Token};
use std::collections::BTreeMap;

/// A span viewed against its owning document, so token slices can be
/// realized on demand.
#[derive(Debug, Clone, Copy)]
pub struct SpanRef<'a> {
    pub doc: &'a Document,
    pub start: usize,
    pub end: usize,
}

impl<'a> SpanRef<'a> {
    /// The tokens inside the span.
    pub fn tokens(&self) -> &'a [Token] {
        &self.doc.tokens[self.start..self.end]
    }

    /// Span length in tokens.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `window` tokens immediately before the span, clipped at the
    /// document start.
    pub fn left_boundary(&self, window: usize) -> &'a [Token] {
        let lo = self.start.saturating_sub(window);
        &self.doc.tokens[lo..self.start]
    }

    /// The `window` tokens from the span end onward (the first token after
    /// the span comes first), clipped at the document end.
    pub fn right_boundary(&self, window: usize) -> &'a [Token] {
        let hi = (self.end + window).min(self.doc.tokens.len());
        &self.doc.tokens[self.end..hi]
    }
}

/// Group all labeled spans of `layer` across the corpus by span type.
///
/// Unlabeled spans carry no type and are left out; documents without the
/// layer contribute nothing.
pub fn spans_by_type<'a>(corpus: &'a Corpus, layer: &str) -> BTreeMap<&'a str, Vec<SpanRef<'a>>> {
    let mut groups: BTreeMap<&'a str, Vec<SpanRef<'a>>> = BTreeMap::new();
    for doc in &corpus.documents {
        let Some(spans) = doc.layers.get(layer) else {
            continue;
        };
        for span in spans {
            let Some(label) = span.label.as_deref() else {
                continue;
            };
            groups.entry(label).or_default().push(SpanRef {
                doc,
                start: span.start,
                end: span.end,
            });
        }
    }
    groups
}

/// Combined left + right boundary tokens per span type for `layer`, over
/// the entire corpus. Left boundaries of every span come before right
/// boundaries, matching the order the distinctiveness metric expects.
pub fn boundary_tokens<'a>(
    corpus: &'a Corpus,
    layer: &str,
    window: usize,
) -> BTreeMap<&'a str, Vec<&'a Token>> {
    let groups = spans_by_type(corpus, layer);
    let mut bounds: BTreeMap<&'a str, Vec<&'a Token>> = BTreeMap::new();
    for (label, spans) in groups {
        let mut tokens: Vec<&'a Token> = Vec::new();
        for span in &spans {
            tokens.extend(span.left_boundary(window));
        }
        for span in &spans {
            tokens.extend(span.right_boundary(window));
        }
        bounds.insert(label, tokens);
    }
    bounds
}
