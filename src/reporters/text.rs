//! Text (terminal) reporter with colors and formatting

use crate::analysis::weighted_average;
use crate::models::{AnalysisReport, MetricTable};
use anyhow::Result;
use std::collections::BTreeMap;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Interpretation note shown per metric in verbose mode
const FREQUENCY_NOTE: &str = "\
Number of spans of each type in the corpus. Frequency tends to be positively
correlated with model performance, although transfer-learning architectures
blunt the data requirement and weaken the correlation.";

const LENGTH_NOTE: &str = "\
Geometric mean of span lengths in tokens. Architectures with strict Markov
assumptions (classic CRFs) degrade on long spans; LSTMs and transformers
hold up better.";

const SPAN_DISTINCTIVENESS_NOTE: &str = "\
KL divergence D(P_span || P_corpus) between the word distribution inside
spans of a type and the whole corpus. High values mean span membership is
visible in local vocabulary; low values mean a model must lean on sequence
context instead.";

const BOUNDARY_DISTINCTIVENESS_NOTE: &str = "\
KL divergence D(P_bound || P_corpus) for the tokens in a window around span
edges. High values mean starts and ends are easy to spot; low values mean
smooth transitions into and out of spans.";

/// Render the report as formatted terminal output
pub fn render(report: &AnalysisReport, verbose: bool) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{BOLD}Span Analysis{RESET}  {DIM}(boundary window = {}){RESET}\n",
        report.config.window_size
    ));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));

    render_count_section(
        &mut out,
        "SPAN TYPE FREQUENCY",
        FREQUENCY_NOTE,
        &report.metrics.frequencies,
        verbose,
    );
    render_value_section(
        &mut out,
        "SPAN LENGTH",
        LENGTH_NOTE,
        &report.metrics.length,
        verbose,
    );
    render_value_section(
        &mut out,
        "SPAN DISTINCTIVENESS",
        SPAN_DISTINCTIVENESS_NOTE,
        &report.metrics.span_distinctiveness,
        verbose,
    );
    render_value_section(
        &mut out,
        "BOUNDARY DISTINCTIVENESS",
        BOUNDARY_DISTINCTIVENESS_NOTE,
        &report.metrics.boundary_distinctiveness,
        verbose,
    );
    render_summary(&mut out, report)?;

    Ok(out)
}

fn render_note(out: &mut String, note: &str) {
    for line in note.lines() {
        out.push_str(&format!("  {DIM}{line}{RESET}\n"));
    }
}

fn type_column_width<T>(table: &MetricTable<T>) -> usize {
    table
        .values()
        .flat_map(|types| types.keys())
        .map(String::len)
        .max()
        .unwrap_or(4)
        .max(4)
}

fn render_count_section(
    out: &mut String,
    title: &str,
    note: &str,
    table: &MetricTable<u64>,
    verbose: bool,
) {
    out.push_str(&format!("\n{BOLD}{title}{RESET}\n"));
    if verbose {
        render_note(out, note);
    }
    let width = type_column_width(table);
    for (layer, types) in table {
        out.push_str(&format!("  layer: {BOLD}{layer}{RESET}\n"));
        if types.is_empty() {
            out.push_str(&format!("    {DIM}(no labeled spans){RESET}\n"));
            continue;
        }
        out.push_str(&format!("    {DIM}{:<width$}  COUNT{RESET}\n", "TYPE"));
        for (span_type, count) in types {
            out.push_str(&format!("    {span_type:<width$}  {count}\n"));
        }
    }
}

fn render_value_section(
    out: &mut String,
    title: &str,
    note: &str,
    table: &MetricTable<f64>,
    verbose: bool,
) {
    out.push_str(&format!("\n{BOLD}{title}{RESET}\n"));
    if verbose {
        render_note(out, note);
    }
    let width = type_column_width(table);
    for (layer, types) in table {
        out.push_str(&format!("  layer: {BOLD}{layer}{RESET}\n"));
        if types.is_empty() {
            out.push_str(&format!("    {DIM}(no labeled spans){RESET}\n"));
            continue;
        }
        out.push_str(&format!("    {DIM}{:<width$}  VALUE{RESET}\n", "TYPE"));
        for (span_type, value) in types {
            out.push_str(&format!("    {span_type:<width$}  {value:.4}\n"));
        }
    }
}

/// The frequency-weighted per-layer summary: one comparability scalar per
/// layer for each value metric.
fn render_summary(out: &mut String, report: &AnalysisReport) -> Result<()> {
    let freq = &report.metrics.frequencies;
    let length = weighted_average(&report.metrics.length, freq)?;
    let span_d = weighted_average(&report.metrics.span_distinctiveness, freq)?;
    let bound_d = weighted_average(&report.metrics.boundary_distinctiveness, freq)?;

    out.push_str(&format!("\n{BOLD}WEIGHTED BY FREQUENCY{RESET}\n"));
    let layers: Vec<&String> = length.keys().collect();
    if layers.is_empty() {
        out.push_str(&format!("  {DIM}(no labeled spans in any layer){RESET}\n"));
        return Ok(());
    }

    let width = layers
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or(5)
        .max(5);
    out.push_str(&format!(
        "  {DIM}{:<width$}  LENGTH   SPAN DIST.  BOUNDARY DIST.{RESET}\n",
        "LAYER"
    ));
    for layer in layers {
        out.push_str(&format!(
            "  {layer:<width$}  {:<7.4}  {:<10.4}  {:.4}\n",
            value_for(&length, layer),
            value_for(&span_d, layer),
            value_for(&bound_d, layer),
        ));
    }
    Ok(())
}

fn value_for(summary: &BTreeMap<String, f64>, layer: &str) -> f64 {
    summary.get(layer).copied().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn render_includes_every_section() {
        let report = test_report();
        let text = render(&report, false).expect("render");
        assert!(text.contains("SPAN TYPE FREQUENCY"));
        assert!(text.contains("SPAN LENGTH"));
        assert!(text.contains("SPAN DISTINCTIVENESS"));
        assert!(text.contains("BOUNDARY DISTINCTIVENESS"));
        assert!(text.contains("WEIGHTED BY FREQUENCY"));
        assert!(text.contains("DRUG"));
        assert!(text.contains("CONDITION"));
    }

    #[test]
    fn verbose_mode_adds_interpretation_notes() {
        let report = test_report();
        let plain = render(&report, false).expect("render");
        let verbose = render(&report, true).expect("render verbose");
        assert!(!plain.contains("Geometric mean of span lengths"));
        assert!(verbose.contains("Geometric mean of span lengths"));
        assert!(verbose.len() > plain.len());
    }

    #[test]
    fn frequency_counts_are_printed() {
        let report = test_report();
        let text = render(&report, false).expect("render");
        // CONDITION appears twice in the fixture
        let line = text
            .lines()
            .find(|l| l.contains("CONDITION") && !l.contains("DIST"))
            .expect("frequency line");
        assert!(line.trim_end().ends_with('2'));
    }
}
