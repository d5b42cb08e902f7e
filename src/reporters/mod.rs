//! Report rendering
//!
//! Turns an [`AnalysisReport`](crate::models::AnalysisReport) into terminal
//! text or JSON. The JSON shape is the interchange artifact downstream
//! tooling reads; the text reporter adds the frequency-weighted per-layer
//! summary on top.

pub mod json;
pub mod text;

#[cfg(test)]
pub(crate) mod tests {
    use crate::models::{AnalysisReport, Corpus, Document, Span};

    /// A small two-type corpus report shared by the reporter tests.
    pub(crate) fn test_report() -> AnalysisReport {
        use crate::analysis::{AnalyzerConfig, SpanAnalyzer};

        let doc = Document::from_words(&[
            "The", "drug", "aspirin", "reduces", "pain", "in", "most", "patients", ".",
        ])
        .with_layer(
            "sc",
            vec![
                Span::new("DRUG", 2, 3),
                Span::new("CONDITION", 4, 5),
                Span::new("CONDITION", 6, 8),
            ],
        );
        let corpus = Corpus::new(vec![doc]);
        let analyzer =
            SpanAnalyzer::new(&corpus, AnalyzerConfig::default()).expect("valid corpus");
        analyzer.analyze().expect("analyzable corpus")
    }
}
