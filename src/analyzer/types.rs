//! Type definitions specific to the analyzer module.

use serde::Serialize;
use std::collections::HashSet;

/// Workstep used when a rule matches without a second capture.
pub const UNKNOWN_WORKSTEP: &str = "Unknown";

/// Aggregation key: a normalized (workflow, workstep) pair.
///
/// Ordering is lexicographic by workflow, then by workstep, and is used as the
/// tie-break when two entries share a count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WorkflowStepKey {
    pub workflow: String,
    pub workstep: String,
}

impl WorkflowStepKey {
    pub fn new(workflow: impl Into<String>, workstep: impl Into<String>) -> Self {
        Self {
            workflow: workflow.into(),
            workstep: workstep.into(),
        }
    }
}

/// One aggregated entry of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowStepCount {
    #[serde(flatten)]
    pub key: WorkflowStepKey,
    pub count: usize,
}

impl WorkflowStepCount {
    pub fn workflow(&self) -> &str {
        &self.key.workflow
    }

    pub fn workstep(&self) -> &str {
        &self.key.workstep
    }
}

/// Entries of a single workflow, as produced by [`AnalysisReport::group_by_workflow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowGroup {
    pub workflow: String,
    pub entries: Vec<WorkflowStepCount>,
    pub total_count: usize,
}

/// `count` as a percentage of `total`, rounded to one decimal place.
///
/// Ties round away from zero (1 of 80 is `1.3`), unlike `{:.1}` formatting
/// which rounds them to even.
pub(crate) fn percent_of(count: usize, total: usize) -> f64 {
    let pct = count as f64 / total.max(1) as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Result of one analysis run.
///
/// Fields are private: a report is never mutated after `analyze` builds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    entries: Vec<WorkflowStepCount>,
    total_lines: usize,
    total_matches: usize,
    unique_workflow_count: usize,
    unique_workstep_count: usize,
}

impl AnalysisReport {
    /// Build a report from already sorted entries, deriving the summary counts.
    pub(crate) fn from_sorted_entries(entries: Vec<WorkflowStepCount>, total_lines: usize) -> Self {
        let total_matches = entries.iter().map(|e| e.count).sum();
        let unique_workflow_count = entries.iter().map(|e| e.workflow()).collect::<HashSet<_>>().len();
        let unique_workstep_count = entries.iter().map(|e| e.workstep()).collect::<HashSet<_>>().len();

        Self {
            entries,
            total_lines,
            total_matches,
            unique_workflow_count,
            unique_workstep_count,
        }
    }

    /// Entries sorted by count descending, then workflow and workstep ascending.
    pub fn entries(&self) -> &[WorkflowStepCount] {
        &self.entries
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    pub fn unique_workflow_count(&self) -> usize {
        self.unique_workflow_count
    }

    pub fn unique_workstep_count(&self) -> usize {
        self.unique_workstep_count
    }

    /// True when no line produced a match. This is a valid outcome, not an error.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Share of all matches represented by `count`, in percent, rounded to one
    /// decimal place with ties away from zero.
    pub fn percentage(&self, count: usize) -> f64 {
        percent_of(count, self.total_matches)
    }

    /// Entries seen at least `min_count` times, in report order.
    pub fn entries_with_min_count(&self, min_count: usize) -> Vec<&WorkflowStepCount> {
        self.entries.iter().filter(|e| e.count >= min_count).collect()
    }

    /// Group entries by workflow, in order of first appearance in the sorted entries.
    pub fn group_by_workflow(&self) -> Vec<WorkflowGroup> {
        let mut groups: Vec<WorkflowGroup> = Vec::new();

        for entry in &self.entries {
            match groups.iter_mut().find(|g| g.workflow == entry.workflow()) {
                Some(group) => {
                    group.total_count += entry.count;
                    group.entries.push(entry.clone());
                }
                None => groups.push(WorkflowGroup {
                    workflow: entry.workflow().to_string(),
                    entries: vec![entry.clone()],
                    total_count: entry.count,
                }),
            }
        }

        groups
    }
}
