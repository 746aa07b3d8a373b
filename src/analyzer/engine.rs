//! Line scanning and aggregation into an [`AnalysisReport`].

use std::collections::HashMap;

use crate::error::{AnalyzerError, Result};

use super::log_parser::match_line;
use super::normalize::normalize_text;
use super::types::{AnalysisReport, WorkflowStepCount, WorkflowStepKey};

/// Analyze a blob of log text.
///
/// Every line is trimmed and handed to the pattern matcher; blank and
/// unrecognized lines count towards `total_lines` but never towards matches.
/// A trailing line feed terminates the last line rather than starting an
/// empty one.
///
/// # Returns
///
/// The finished report, or [`AnalyzerError::InvalidInput`] when `text` is empty
/// or whitespace only. A report without entries is a valid outcome.
pub fn analyze(text: &str) -> Result<AnalysisReport> {
    if text.trim().is_empty() {
        return Err(AnalyzerError::InvalidInput);
    }

    let mut counts: HashMap<WorkflowStepKey, usize> = HashMap::new();
    let mut total_lines = 0usize;

    for (index, line) in text.lines().enumerate() {
        total_lines += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let Some(line_match) = match_line(trimmed) else {
            log::debug!("Unrecognized log line {}: {}", index + 1, trimmed);
            continue;
        };

        let workflow = normalize_text(&line_match.workflow);
        let workstep = normalize_text(&line_match.workstep);
        if workflow.is_empty() || workstep.is_empty() {
            continue;
        }

        log::trace!("Line {} matched {} rule: {} / {}", index + 1, line_match.rule, workflow, workstep);
        *counts.entry(WorkflowStepKey { workflow, workstep }).or_insert(0) += 1;
    }

    let mut entries: Vec<WorkflowStepCount> = counts
        .into_iter()
        .map(|(key, count)| WorkflowStepCount { key, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));

    let report = AnalysisReport::from_sorted_entries(entries, total_lines);
    log::debug!(
        "Analyzed {} lines: {} matches across {} combinations",
        report.total_lines(),
        report.total_matches(),
        report.entries().len()
    );

    Ok(report)
}
