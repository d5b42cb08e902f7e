//! Kullback-Leibler divergence between unigram distributions
//!
//! `D(P||Q) = sum over w in P of P[w] * ln(P[w] / Q[w])`. Asymmetric by
//! design: only words present in P contribute; words that exist only in Q
//! add nothing.
//!
//! Lookup policy: a word of P that is absent from Q is a hard failure, as is
//! zero mass inside P. The analyzer always passes the whole-corpus
//! distribution as Q, and every P it builds draws its vocabulary from the
//! same corpus, so through the metric entry points these failures are
//! unreachable on a validated corpus. Callers using this function directly
//! must guarantee Q's vocabulary is a superset of P's or handle the error.

use super::distribution::UnigramDistribution;
use super::error::AnalysisError;

/// Compute `D(P||Q)` over unigram word distributions.
pub fn kl_divergence(
    p: &UnigramDistribution,
    q: &UnigramDistribution,
) -> Result<f64, AnalysisError> {
    if q.is_empty() && !p.is_empty() {
        return Err(AnalysisError::EmptyDistribution);
    }

    let mut total = 0.0;
    for (word, p_mass) in p.iter() {
        if p_mass <= 0.0 {
            return Err(AnalysisError::ZeroMass {
                word: word.to_string(),
            });
        }
        let q_mass = q.mass(word);
        if q_mass <= 0.0 {
            return Err(AnalysisError::MissingVocabulary {
                word: word.to_string(),
            });
        }
        total += p_mass * (p_mass / q_mass).ln();
    }
    Ok(total)
}
