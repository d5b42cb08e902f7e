//! Spanprobe - span annotation statistics
//!
//! A local-first CLI that computes diagnostic statistics over span-annotated
//! corpora to estimate, before any model is trained, how learnable a given
//! span-annotation scheme will be.
//!
//! The analysis core ([`analysis`]) turns a corpus of tokenized documents
//! with named span layers into four families of per-(layer, span type)
//! metrics:
//!
//! - **Frequency** - span counts per type
//! - **Length** - geometric mean of span lengths in tokens
//! - **Span distinctiveness** - KL divergence of span-internal vocabulary
//!   against the corpus
//! - **Boundary distinctiveness** - KL divergence of span-edge vocabulary
//!   against the corpus
//!
//! plus a frequency-weighted per-layer aggregation. Everything else in the
//! crate is a collaborator: format converters ([`corpus`]), the binary
//! corpus file, and the presentation layer ([`cli`], [`reporters`]).

pub mod analysis;
pub mod cli;
pub mod corpus;
pub mod models;
pub mod reporters;
