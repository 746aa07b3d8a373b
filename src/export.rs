//! CSV export of an analysis report.
//!
//! The document has one row per entry followed by a summary trailer:
//!
//! ```text
//! Workflow,Workstep,Count,Percentage
//! ORDR,VALIDATE,5,83.3%
//! ORDR,SHIP,1,16.7%
//!
//! Analysis Summary
//! Total Lines Processed,6
//! ...
//! ```
//!
//! Fields are quoted only when they contain a delimiter, quote or line break,
//! so plain names come out bare (`ORDR,VALIDATE,5,83.3%`). Spreadsheet tools
//! read both forms the same way.

use chrono::{DateTime, Utc};
use std::io::Write;

use crate::analyzer::types::percent_of;
use crate::analyzer::{AnalysisReport, WorkflowStepCount};
use crate::config::DEFAULT_MIN_OCCURRENCES;
use crate::error::Result;

const HEADER: [&str; 4] = ["Workflow", "Workstep", "Count", "Percentage"];

/// How a report is turned into an [`ExportSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Hide entries seen fewer than this many times.
    pub min_occurrences: Option<usize>,
    /// File name (or `pasted-content`) recorded in the trailer.
    pub source_name: String,
}

/// The exported view of one report: filtered entries plus trailer metadata.
#[derive(Debug, Clone)]
pub struct ExportSnapshot {
    pub entries: Vec<WorkflowStepCount>,
    pub total_lines: usize,
    pub total_matches: usize,
    pub unique_workflows: usize,
    pub unique_worksteps: usize,
    pub min_occurrences: Option<usize>,
    pub source_name: String,
    pub generated_at: DateTime<Utc>,
}

impl ExportSnapshot {
    /// Snapshot `report`, stamping the current time.
    pub fn new(report: &AnalysisReport, options: ExportOptions) -> Self {
        Self::with_timestamp(report, options, Utc::now())
    }

    pub fn with_timestamp(report: &AnalysisReport, options: ExportOptions, generated_at: DateTime<Utc>) -> Self {
        let entries = match options.min_occurrences {
            Some(min) => report.entries_with_min_count(min).into_iter().cloned().collect(),
            None => report.entries().to_vec(),
        };

        Self {
            entries,
            total_lines: report.total_lines(),
            total_matches: report.total_matches(),
            unique_workflows: report.unique_workflow_count(),
            unique_worksteps: report.unique_workstep_count(),
            min_occurrences: options.min_occurrences,
            source_name: options.source_name,
            generated_at,
        }
    }

    /// Percentage of the unfiltered total, one decimal place.
    fn percentage(&self, count: usize) -> String {
        format!("{:.1}%", percent_of(count, self.total_matches))
    }
}

/// Write `snapshot` as a CSV document.
///
/// Text fields are quoted when needed and embedded quotes are doubled. Rows
/// have varying widths, so the writer runs in flexible mode.
pub fn write_csv<W: Write>(snapshot: &ExportSnapshot, mut writer: W) -> Result<()> {
    {
        let mut rows = csv_writer(&mut writer);
        rows.write_record(HEADER)?;
        for entry in &snapshot.entries {
            rows.write_record([
                entry.workflow(),
                entry.workstep(),
                entry.count.to_string().as_str(),
                snapshot.percentage(entry.count).as_str(),
            ])?;
        }
        rows.flush().map_err(csv::Error::from)?;
    }

    // An empty record would come out as `""`, so the spacer row bypasses the csv writer.
    writer.write_all(b"\n").map_err(csv::Error::from)?;

    let threshold = snapshot.min_occurrences.unwrap_or(DEFAULT_MIN_OCCURRENCES);
    let filter_label = format!("Filter Applied (< {} occurrences)", threshold);
    let filter_value = if snapshot.min_occurrences.is_some() { "Yes" } else { "No" };

    let mut trailer = csv_writer(&mut writer);
    trailer.write_record(["Analysis Summary"])?;
    trailer.write_record(["Total Lines Processed", snapshot.total_lines.to_string().as_str()])?;
    trailer.write_record(["Total Matches Found", snapshot.total_matches.to_string().as_str()])?;
    trailer.write_record(["Unique Workflows", snapshot.unique_workflows.to_string().as_str()])?;
    trailer.write_record(["Unique Worksteps", snapshot.unique_worksteps.to_string().as_str()])?;
    trailer.write_record([filter_label.as_str(), filter_value])?;
    trailer.write_record(["File Name", snapshot.source_name.as_str()])?;
    trailer.write_record([
        "Analysis Date",
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().as_str(),
    ])?;
    trailer.flush().map_err(csv::Error::from)?;

    log::debug!("Exported {} CSV rows for {}", snapshot.entries.len(), snapshot.source_name);
    Ok(())
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().flexible(true).from_writer(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use chrono::TimeZone;

    fn export(report: &AnalysisReport, min_occurrences: Option<usize>) -> String {
        let options = ExportOptions {
            min_occurrences,
            source_name: "server.log".to_string(),
        };
        let timestamp = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let snapshot = ExportSnapshot::with_timestamp(report, options, timestamp);

        let mut out = Vec::new();
        write_csv(&snapshot, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn domain_report() -> AnalysisReport {
        let mut text = "Processing Workflow ORDR Workstep VALIDATE WorkAction Default\n".repeat(5);
        text.push_str("Processing Workflow ORDR Workstep SHIP WorkAction Default\n");
        analyze(&text).unwrap()
    }

    #[test]
    fn test_full_document() {
        let csv = export(&domain_report(), None);
        let expected = "Workflow,Workstep,Count,Percentage\n\
                        ORDR,VALIDATE,5,83.3%\n\
                        ORDR,SHIP,1,16.7%\n\
                        \n\
                        Analysis Summary\n\
                        Total Lines Processed,6\n\
                        Total Matches Found,6\n\
                        Unique Workflows,1\n\
                        Unique Worksteps,2\n\
                        Filter Applied (< 5 occurrences),No\n\
                        File Name,server.log\n\
                        Analysis Date,2025-03-04 05:06:07 UTC\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_filter_keeps_unfiltered_percentages() {
        let csv = export(&domain_report(), Some(5));
        assert!(csv.contains("ORDR,VALIDATE,5,83.3%\n"));
        assert!(!csv.contains("SHIP"));
        assert!(csv.contains("Filter Applied (< 5 occurrences),Yes\n"));
        assert!(csv.contains("Total Matches Found,6\n"));
    }

    #[test]
    fn test_percentage_ties_round_up() {
        let mut text = String::from("a.b\n");
        text.push_str(&"c.d\n".repeat(79));
        let csv = export(&analyze(&text).unwrap(), None);
        assert!(csv.contains("a,b,1,1.3%\n"), "got {}", csv);
    }

    #[test]
    fn test_quotes_are_escaped() {
        let report = analyze("WF: Say \"hi\" now, WS: Step, two\n").unwrap();
        let csv = export(&report, None);
        assert!(csv.contains("\"Say \"\"hi\"\" now\",\"Step, two\",1,100.0%\n"), "got {}", csv);
    }

    #[test]
    fn test_empty_report_exports_trailer() {
        let report = analyze("nothing to see\n").unwrap();
        let csv = export(&report, None);
        assert!(csv.starts_with("Workflow,Workstep,Count,Percentage\n\nAnalysis Summary\n"));
        assert!(csv.contains("Total Matches Found,0\n"));
    }
}
