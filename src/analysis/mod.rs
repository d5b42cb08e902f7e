//! The span analysis core
//!
//! Turns a corpus of tokenized, span-annotated documents into four families
//! of per-(layer, span type) metrics plus a frequency-weighted per-layer
//! aggregation:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       SpanAnalyzer                         │
//! │  - validates every span up front (fail fast)               │
//! │  - caches the corpus distribution and the layer keys       │
//! │  - computes the four metrics, independently and in         │
//! │    parallel (rayon), joining before aggregation            │
//! └────────────────────────────────────────────────────────────┘
//!        │                │                 │
//!        ▼                ▼                 ▼
//!  distribution      divergence         extract
//!  (unigram word     (KL against the    (group by type,
//!   distributions)    corpus)            boundary windows)
//! ```
//!
//! The core owns no I/O and never mutates the corpus. Every metric is
//! recomputed on each call; there is no hidden memoization beyond the
//! corpus distribution and layer keys captured at construction. Mutating
//! the corpus between calls through interior mutability is outside the
//! contract - corpora are expected to stay immutable for the lifetime of
//! the analyzer borrowing them.

pub mod aggregate;
pub mod distribution;
pub mod divergence;
pub mod error;
pub mod extract;

pub use aggregate::{geometric_mean, weighted_average};
pub use distribution::{normalize_text, UnigramDistribution};
pub use divergence::kl_divergence;
pub use error::AnalysisError;
pub use extract::{boundary_tokens, spans_by_type, SpanRef};

use crate::models::{AnalysisReport, Corpus, MetricSet, MetricTable, ReportConfig};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Analyzer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Boundary window size in tokens, at least 1.
    pub window_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { window_size: 1 }
    }
}

/// Computes span statistics over one corpus.
///
/// Construction validates the corpus and caches the normalized whole-corpus
/// word distribution plus the set of layer keys. The four metric methods
/// are read-only and freely repeatable.
#[derive(Debug)]
pub struct SpanAnalyzer<'a> {
    corpus: &'a Corpus,
    config: AnalyzerConfig,
    p_corpus: UnigramDistribution,
    keys: BTreeSet<String>,
}

impl<'a> SpanAnalyzer<'a> {
    pub fn new(corpus: &'a Corpus, config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        if config.window_size == 0 {
            return Err(AnalysisError::InvalidWindow(0));
        }
        validate(corpus)?;

        let p_corpus = UnigramDistribution::from_token_slices(
            corpus.documents.iter().map(|d| d.tokens.as_slice()),
            true,
        );
        let keys: BTreeSet<String> = corpus
            .documents
            .iter()
            .flat_map(|d| d.layers.keys().cloned())
            .collect();
        debug!(
            documents = corpus.len(),
            tokens = corpus.token_count(),
            layers = keys.len(),
            vocabulary = p_corpus.len(),
            "analyzer ready"
        );

        Ok(Self {
            corpus,
            config,
            p_corpus,
            keys,
        })
    }

    /// All layer keys present anywhere in the corpus.
    pub fn keys(&self) -> &BTreeSet<String> {
        &self.keys
    }

    /// The cached, normalized whole-corpus word distribution.
    pub fn corpus_distribution(&self) -> &UnigramDistribution {
        &self.p_corpus
    }

    pub fn config(&self) -> AnalyzerConfig {
        self.config
    }

    /// Span counts per (layer, type), corpus-wide. Unlabeled spans are
    /// excluded. This table is also the weighting signal for
    /// [`weighted_average`].
    pub fn frequency(&self) -> MetricTable<u64> {
        let mut table = MetricTable::new();
        for key in &self.keys {
            let counts: BTreeMap<String, u64> = spans_by_type(self.corpus, key)
                .into_iter()
                .map(|(label, spans)| (label.to_string(), spans.len() as u64))
                .collect();
            table.insert(key.clone(), counts);
        }
        table
    }

    /// Geometric mean of span lengths in tokens, per (layer, type).
    ///
    /// Long spans are where strict-Markov architectures (classic CRFs)
    /// struggle; LSTMs and transformers degrade more gracefully.
    pub fn length(&self) -> Result<MetricTable<f64>, AnalysisError> {
        let mut table = MetricTable::new();
        for key in &self.keys {
            let mut means = BTreeMap::new();
            for (label, spans) in spans_by_type(self.corpus, key) {
                let lengths: Vec<usize> = spans.iter().map(SpanRef::len).collect();
                means.insert(label.to_string(), geometric_mean(&lengths)?);
            }
            table.insert(key.clone(), means);
        }
        Ok(table)
    }

    /// `D(P_span || P_corpus)` per (layer, type): how far the vocabulary
    /// inside spans of a type diverges from the background corpus.
    ///
    /// High values mean span membership is visible in local vocabulary;
    /// low values mean a model has to lean on sequence context instead.
    pub fn span_distinctiveness(&self) -> Result<MetricTable<f64>, AnalysisError> {
        let mut table = MetricTable::new();
        for key in &self.keys {
            let mut values = BTreeMap::new();
            for (label, spans) in spans_by_type(self.corpus, key) {
                let p_span = UnigramDistribution::from_token_slices(
                    spans.iter().map(|s| s.tokens()),
                    true,
                );
                values.insert(label.to_string(), kl_divergence(&p_span, &self.p_corpus)?);
            }
            table.insert(key.clone(), values);
        }
        Ok(table)
    }

    /// `D(P_bound || P_corpus)` per (layer, type): how sharply span edges
    /// are marked by the vocabulary just outside them.
    ///
    /// Boundary collections are flat token lists, so the distribution is
    /// built in unigram mode - one count per boundary token.
    pub fn boundary_distinctiveness(&self) -> Result<MetricTable<f64>, AnalysisError> {
        let window = self.config.window_size;
        let mut table = MetricTable::new();
        for key in &self.keys {
            let mut values = BTreeMap::new();
            for (label, tokens) in boundary_tokens(self.corpus, key, window) {
                let p_bound =
                    UnigramDistribution::from_tokens(tokens.iter().copied(), true);
                values.insert(label.to_string(), kl_divergence(&p_bound, &self.p_corpus)?);
            }
            table.insert(key.clone(), values);
        }
        Ok(table)
    }

    /// Compute all four metrics - in parallel, since they are independent
    /// read-only passes - and assemble the report.
    pub fn analyze(&self) -> Result<AnalysisReport, AnalysisError> {
        let (frequencies, (length, (span_d, bound_d))) = rayon::join(
            || self.frequency(),
            || {
                rayon::join(
                    || self.length(),
                    || {
                        rayon::join(
                            || self.span_distinctiveness(),
                            || self.boundary_distinctiveness(),
                        )
                    },
                )
            },
        );

        Ok(AnalysisReport {
            metrics: MetricSet {
                frequencies,
                length: length?,
                span_distinctiveness: span_d?,
                boundary_distinctiveness: bound_d?,
            },
            config: ReportConfig {
                window_size: self.config.window_size,
            },
        })
    }
}

/// Reject malformed corpora outright; annotations are never repaired.
fn validate(corpus: &Corpus) -> Result<(), AnalysisError> {
    for (doc_idx, doc) in corpus.documents.iter().enumerate() {
        for (layer, spans) in &doc.layers {
            for span in spans {
                if span.start >= span.end || span.end > doc.len() {
                    return Err(AnalysisError::InvalidSpan {
                        layer: layer.clone(),
                        doc: doc_idx,
                        start: span.start,
                        end: span.end,
                        doc_len: doc.len(),
                    });
                }
            }
        }
    }
    Ok(())
}
