//! Core data models for spanprobe
//!
//! These models are shared by the analysis core, the corpus converters, and
//! the reporters: tokenized documents with named span layers, and the
//! analysis report that the CLI renders and serializes.
//!
//! Documents are built entirely by the converters (or by library callers)
//! before analysis starts; nothing in the analysis core mutates them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single token: its text and 0-based position within the owning document.
///
/// Positions are contiguous and unique per document; spans reference tokens
/// by position only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub position: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// A labeled, contiguous token range `[start, end)` within one document.
///
/// Invariant: `0 <= start < end <= document length`. The analyzer validates
/// this up front and refuses malformed corpora.
///
/// `label: None` models annotations without a type. Unlabeled spans are
/// excluded from frequency counting and from per-type grouping; their tokens
/// still count toward the corpus distribution like any other document token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub label: Option<String>,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            label: Some(label.into()),
            start,
            end,
        }
    }

    pub fn unlabeled(start: usize, end: usize) -> Self {
        Self {
            label: None,
            start,
            end,
        }
    }

    /// Span length in tokens.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An ordered token sequence plus named span layers over it.
///
/// A document may carry several layers (e.g. distinct annotation schemes);
/// layer names map to the spans of that layer within this document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub tokens: Vec<Token>,
    pub layers: BTreeMap<String, Vec<Span>>,
}

impl Document {
    /// Build a document from bare words, assigning positions in order.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            tokens: words
                .iter()
                .enumerate()
                .map(|(i, w)| Token::new(w.as_ref(), i))
                .collect(),
            layers: BTreeMap::new(),
        }
    }

    /// Add a span layer, replacing any existing layer of the same name.
    pub fn with_layer(mut self, name: impl Into<String>, spans: Vec<Span>) -> Self {
        self.layers.insert(name.into(), spans);
        self
    }

    /// Token count.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// An ordered collection of documents. Document order is irrelevant to every
/// metric; all of them are corpus-wide aggregations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total token count across all documents.
    pub fn token_count(&self) -> usize {
        self.documents.iter().map(Document::len).sum()
    }

    /// Total span count across all layers of all documents.
    pub fn span_count(&self) -> usize {
        self.documents
            .iter()
            .flat_map(|d| d.layers.values())
            .map(Vec::len)
            .sum()
    }
}

/// A per-(layer, span type) metric table. BTreeMaps keep report ordering
/// deterministic across runs.
pub type MetricTable<T> = BTreeMap<String, BTreeMap<String, T>>;

/// The four metric families of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub frequencies: MetricTable<u64>,
    pub length: MetricTable<f64>,
    pub span_distinctiveness: MetricTable<f64>,
    pub boundary_distinctiveness: MetricTable<f64>,
}

/// Configuration echoed into the report so results stay interpretable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub window_size: usize,
}

/// The full analysis artifact.
///
/// The serialized shape of this struct (field names and nesting) is the
/// interchange format consumed by downstream tooling; treat it as frozen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metrics: MetricSet,
    pub config: ReportConfig,
}
