//! Unigram word-frequency distributions
//!
//! Builds raw-count or normalized unigram distributions over the normalized
//! text of tokens. Two construction modes mirror the two shapes the analyzer
//! feeds in: a collection of token-bearing containers (documents, span
//! groups) counted token by token, and an already-flat token list (boundary
//! tokens) counted one per item.

use crate::models::Token;
use rustc_hash::FxHashMap;

/// Normalize token text for counting.
///
/// Lowercase, then fold the PTB-style quote pairs `` `` `` and `''` into a
/// plain double quote. Nothing else - no digit folding, no punctuation
/// stripping. Hand-verified corpora depend on this exact rule.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase().replace("``", "\"").replace("''", "\"")
}

/// A unigram distribution over normalized word strings.
///
/// Values are raw counts or, after normalization, probabilities summing
/// to 1.0. Lookup of an absent word yields zero mass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnigramDistribution {
    masses: FxHashMap<String, f64>,
}

impl UnigramDistribution {
    /// Tally every token of every container. Empty input yields an empty
    /// distribution, not an error.
    pub fn from_token_slices<'a, I>(slices: I, normalize: bool) -> Self
    where
        I: IntoIterator<Item = &'a [Token]>,
    {
        let mut counts: FxHashMap<String, f64> = FxHashMap::default();
        for slice in slices {
            for token in slice {
                *counts.entry(normalize_text(&token.text)).or_insert(0.0) += 1.0;
            }
        }
        Self::from_counts(counts, normalize)
    }

    /// Unigram mode: one count per item. Used for boundary collections,
    /// which are already flat token lists rather than containers.
    pub fn from_tokens<'a, I>(tokens: I, normalize: bool) -> Self
    where
        I: IntoIterator<Item = &'a Token>,
    {
        let mut counts: FxHashMap<String, f64> = FxHashMap::default();
        for token in tokens {
            *counts.entry(normalize_text(&token.text)).or_insert(0.0) += 1.0;
        }
        Self::from_counts(counts, normalize)
    }

    fn from_counts(mut counts: FxHashMap<String, f64>, normalize: bool) -> Self {
        if normalize {
            let total: f64 = counts.values().sum();
            if total > 0.0 {
                for mass in counts.values_mut() {
                    *mass /= total;
                }
            }
        }
        Self { masses: counts }
    }

    /// Mass of a word; absent words carry zero.
    pub fn mass(&self, word: &str) -> f64 {
        self.masses.get(word).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.masses.contains_key(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Sum of all masses (1.0 for a normalized, non-empty distribution).
    pub fn total(&self) -> f64 {
        self.masses.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.masses.iter().map(|(word, mass)| (word.as_str(), *mass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;

    fn tokens(words: &[&str]) -> Vec<Token> {
        Document::from_words(words).tokens
    }

    #[test]
    fn normalization_rule_is_exact() {
        assert_eq!(normalize_text("The"), "the");
        assert_eq!(normalize_text("``"), "\"");
        assert_eq!(normalize_text("''"), "\"");
        // No digit folding
        assert_eq!(normalize_text("2023"), "2023");
    }

    #[test]
    fn raw_counts_tally_tokens() {
        let toks = tokens(&["the", "The", "drug"]);
        let dist = UnigramDistribution::from_token_slices([toks.as_slice()], false);
        assert_eq!(dist.mass("the"), 2.0);
        assert_eq!(dist.mass("drug"), 1.0);
        assert_eq!(dist.mass("absent"), 0.0);
    }

    #[test]
    fn normalized_masses_sum_to_one() {
        let toks = tokens(&["a", "b", "b", "c", "c", "c"]);
        let dist = UnigramDistribution::from_token_slices([toks.as_slice()], true);
        assert!((dist.total() - 1.0).abs() < 1e-9);
        assert!((dist.mass("c") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn counts_span_multiple_slices() {
        let a = tokens(&["x", "y"]);
        let b = tokens(&["y", "z"]);
        let dist =
            UnigramDistribution::from_token_slices([a.as_slice(), b.as_slice()], false);
        assert_eq!(dist.mass("y"), 2.0);
        assert_eq!(dist.len(), 3);
    }

    #[test]
    fn unigram_mode_counts_one_per_item() {
        let toks = tokens(&["drug", "drug", "reduces"]);
        let dist = UnigramDistribution::from_tokens(toks.iter(), false);
        assert_eq!(dist.mass("drug"), 2.0);
        assert_eq!(dist.mass("reduces"), 1.0);
    }

    #[test]
    fn empty_input_yields_empty_distribution() {
        let dist = UnigramDistribution::from_token_slices(std::iter::empty::<&[Token]>(), true);
        assert!(dist.is_empty());
        assert_eq!(dist.mass("anything"), 0.0);
    }
}
