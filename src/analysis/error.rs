//! Typed failures of the analysis core
//!
//! Malformed annotations fail fast; statistical degenerate cases fail
//! explicitly instead of averaging a placeholder into downstream results.
//! Nothing here retries - every operation is deterministic and in-memory,
//! so a failure is always a caller problem, never a transient one.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A span violates `0 <= start < end <= document length`. The analyzer
    /// refuses the corpus rather than repairing annotations.
    #[error("invalid span [{start}, {end}) in layer '{layer}': document {doc} has {doc_len} tokens")]
    InvalidSpan {
        layer: String,
        doc: usize,
        start: usize,
        end: usize,
        doc_len: usize,
    },

    /// The boundary window must cover at least one token.
    #[error("boundary window must be at least 1, got {0}")]
    InvalidWindow(usize),

    /// Geometric mean over an empty sample is undefined.
    #[error("geometric mean is undefined for an empty sample")]
    EmptySample,

    /// Geometric mean with a zero-length member is undefined.
    #[error("geometric mean is undefined for a sample containing zero")]
    ZeroLength,

    /// KL divergence against an empty reference distribution.
    #[error("reference distribution is empty")]
    EmptyDistribution,

    /// A word of P carries zero probability mass (ln(0) domain error).
    #[error("word '{word}' carries zero probability mass")]
    ZeroMass { word: String },

    /// A word of P is absent from Q. Callers avoid this by construction
    /// whenever Q is the whole-corpus distribution and P draws its
    /// vocabulary from the same corpus.
    #[error("word '{word}' is absent from the reference distribution")]
    MissingVocabulary { word: String },

    /// The metric and frequency tables disagree on a type key. Both tables
    /// must be derived from the same corpus and layer set.
    #[error("span type '{span_type}' in layer '{layer}' appears in only one of the metric and frequency tables")]
    KeyMismatch { layer: String, span_type: String },
}
