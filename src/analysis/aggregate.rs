//! Statistical aggregation helpers
//!
//! The geometric mean behind the length metric, and the frequency-weighted
//! per-layer average that compresses type-level tables into one scalar per
//! layer. Degenerate inputs fail explicitly; no placeholder values ever
//! reach downstream aggregation.

use super::error::AnalysisError;
use crate::models::MetricTable;
use std::collections::BTreeMap;
use tracing::debug;

/// Geometric mean of span lengths in tokens.
///
/// Computed in log space as `exp(mean(ln(len)))`. Empty samples and
/// zero-length members are rejected; the result for them is undefined and
/// returning 1.0 or 0.0 would poison any average built on top.
pub fn geometric_mean(lengths: &[usize]) -> Result<f64, AnalysisError> {
    if lengths.is_empty() {
        return Err(AnalysisError::EmptySample);
    }
    let mut log_sum = 0.0;
    for &len in lengths {
        if len == 0 {
            return Err(AnalysisError::ZeroLength);
        }
        log_sum += (len as f64).ln();
    }
    Ok((log_sum / lengths.len() as f64).exp())
}

/// Frequency-weighted arithmetic mean of a per-(layer, type) metric,
/// producing one scalar per layer.
///
/// Weights are the frequency counts of that layer's types, matched by type
/// key. Both tables must come from the same corpus and layer set; a type
/// present in only one of them is a caller error. Layers without a single
/// labeled span have no summary and are omitted.
pub fn weighted_average(
    metric: &MetricTable<f64>,
    frequency: &MetricTable<u64>,
) -> Result<BTreeMap<String, f64>, AnalysisError> {
    let mut summary = BTreeMap::new();

    for (layer, values) in metric {
        let counts = frequency
            .get(layer)
            .ok_or_else(|| AnalysisError::KeyMismatch {
                layer: layer.clone(),
                span_type: String::new(),
            })?;

        for span_type in counts.keys() {
            if !values.contains_key(span_type) {
                return Err(AnalysisError::KeyMismatch {
                    layer: layer.clone(),
                    span_type: span_type.clone(),
                });
            }
        }

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for (span_type, value) in values {
            let count = counts
                .get(span_type)
                .ok_or_else(|| AnalysisError::KeyMismatch {
                    layer: layer.clone(),
                    span_type: span_type.clone(),
                })?;
            weighted_sum += *count as f64 * value;
            weight_total += *count as f64;
        }

        if weight_total == 0.0 {
            debug!(layer = %layer, "layer has no labeled spans, skipping summary");
            continue;
        }
        summary.insert(layer.clone(), weighted_sum / weight_total);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(layer: &str, entries: &[(&str, f64)]) -> MetricTable<f64> {
        let mut inner = BTreeMap::new();
        for (k, v) in entries {
            inner.insert(k.to_string(), *v);
        }
        let mut t = MetricTable::new();
        t.insert(layer.to_string(), inner);
        t
    }

    fn freq(layer: &str, entries: &[(&str, u64)]) -> MetricTable<u64> {
        let mut inner = BTreeMap::new();
        for (k, v) in entries {
            inner.insert(k.to_string(), *v);
        }
        let mut t = MetricTable::new();
        t.insert(layer.to_string(), inner);
        t
    }

    #[test]
    fn geometric_mean_of_two_and_eight_is_four() {
        let g = geometric_mean(&[2, 8]).expect("valid sample");
        assert!((g - 4.0).abs() < 1e-12);
    }

    #[test]
    fn geometric_mean_of_singleton() {
        let g = geometric_mean(&[5]).expect("valid sample");
        assert!((g - 5.0).abs() < 1e-12);
    }

    #[test]
    fn geometric_mean_rejects_empty_sample() {
        assert_eq!(geometric_mean(&[]).unwrap_err(), AnalysisError::EmptySample);
    }

    #[test]
    fn geometric_mean_rejects_zero_lengths() {
        assert_eq!(
            geometric_mean(&[1, 0, 3]).unwrap_err(),
            AnalysisError::ZeroLength
        );
    }

    #[test]
    fn equal_weights_reduce_to_the_arithmetic_mean() {
        let metric = table("sc", &[("A", 1.0), ("B", 2.0), ("C", 6.0)]);
        let counts = freq("sc", &[("A", 7), ("B", 7), ("C", 7)]);
        let summary = weighted_average(&metric, &counts).expect("matched keys");
        assert!((summary["sc"] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn frequency_weights_pull_the_mean() {
        let metric = table("sc", &[("A", 1.0), ("B", 5.0)]);
        let counts = freq("sc", &[("A", 3), ("B", 1)]);
        let summary = weighted_average(&metric, &counts).expect("matched keys");
        assert!((summary["sc"] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn mismatched_type_keys_are_an_error() {
        let metric = table("sc", &[("A", 1.0)]);
        let counts = freq("sc", &[("A", 1), ("B", 2)]);
        let err = weighted_average(&metric, &counts).unwrap_err();
        assert!(matches!(err, AnalysisError::KeyMismatch { .. }));
    }

    #[test]
    fn layer_without_labeled_spans_is_omitted() {
        let metric = table("sc", &[]);
        let counts = freq("sc", &[]);
        let summary = weighted_average(&metric, &counts).expect("empty layer");
        assert!(summary.is_empty());
    }
}
