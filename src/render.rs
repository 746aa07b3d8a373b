//! Plain-text rendering of an analysis report for the terminal.

use std::fmt::Write;

use crate::analyzer::AnalysisReport;

/// Rendering options for [`render_table`].
#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    /// Hide entries seen fewer than this many times.
    pub min_occurrences: Option<usize>,
    /// Number of leading rows marked with `*`.
    pub highlight_top: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            min_occurrences: None,
            highlight_top: 3,
        }
    }
}

/// Render the ranked entries as a fixed-width table.
///
/// Empty reports render a "no results" notice instead of a table.
pub fn render_table(report: &AnalysisReport, options: TableOptions) -> String {
    let mut out = String::new();

    if report.is_empty() {
        let _ = writeln!(out, "No workflow/workstep patterns found in {} log lines.", report.total_lines());
        let _ = writeln!(
            out,
            "Supported formats include 'Processing Workflow X Workstep Y WorkAction Z', \
             \"workflow 'X' workstep 'Y'\", 'Workflow [X] - Step [Y]' and 'X.Y'."
        );
        return out;
    }

    let visible = report.entries_with_min_count(options.min_occurrences.unwrap_or(0));

    let _ = writeln!(
        out,
        "Found {} workflow/workstep matches across {} unique combinations in {} log lines.",
        report.total_matches(),
        report.entries().len(),
        report.total_lines()
    );
    if visible.len() != report.entries().len() {
        let _ = writeln!(out, "Showing {} of {} results.", visible.len(), report.entries().len());
    }
    out.push('\n');

    let workflow_width = visible.iter().map(|e| e.workflow().chars().count()).max().unwrap_or(0).max(8);
    let workstep_width = visible.iter().map(|e| e.workstep().chars().count()).max().unwrap_or(0).max(8);

    let _ = writeln!(
        out,
        "  {:>4}  {:<ww$}  {:<sw$}  {:>7}  {:>6}",
        "#",
        "Workflow",
        "Workstep",
        "Count",
        "Share",
        ww = workflow_width,
        sw = workstep_width
    );

    for (rank, entry) in visible.iter().enumerate() {
        let marker = if rank < options.highlight_top { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:>4}  {:<ww$}  {:<sw$}  {:>7}  {:>5.1}%",
            marker,
            rank + 1,
            entry.workflow(),
            entry.workstep(),
            entry.count,
            report.percentage(entry.count),
            ww = workflow_width,
            sw = workstep_width
        );
    }

    out
}

/// Render the three summary counters.
pub fn render_summary(report: &AnalysisReport) -> String {
    format!(
        "Total Matches: {}\nUnique Workflows: {}\nUnique Worksteps: {}\n",
        report.total_matches(),
        report.unique_workflow_count(),
        report.unique_workstep_count()
    )
}
