//! Corpus acquisition collaborators
//!
//! Everything that builds a [`Corpus`](crate::models::Corpus) lives here:
//! converters for the common annotation dump formats (CoNLL column files,
//! GENIA nested IOB, BRAT standoff) and the binary corpus file the CLI
//! reads back for analysis. The analysis core consumes already-built
//! corpora and owns none of this.

pub mod brat;
pub mod conll;
pub mod genia;
pub mod store;
pub mod tokenize;
