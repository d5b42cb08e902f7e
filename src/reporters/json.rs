//! JSON reporter
//!
//! Serializes the full AnalysisReport. The field names and nesting are
//! frozen - existing tooling parses this shape - so changes to the report
//! model are interchange-format changes and must be treated as such.

use crate::models::AnalysisReport;
use anyhow::Result;

/// Render the report as pretty-printed JSON
pub fn render(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render the report as compact JSON (single line)
pub fn render_compact(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}
