//! Workflow log analyzer: extracts workflow/workstep event counts from
//! free-form log text and presents them as a ranked, exportable report.
//!
//! - `analyzer`: pattern matching, normalization, aggregation and file loading
//! - `export`: CSV document with a summary trailer
//! - `redact`: display-only scrambling of sensitive identifiers
//! - `render`: terminal table and summary counters
//! - `config`: optional TOML settings for the front end

pub mod analyzer;
pub mod config;
pub mod error;
pub mod export;
pub mod redact;
pub mod render;

pub use analyzer::{AnalysisReport, LogLoader, WorkflowStepCount, WorkflowStepKey, analyze};
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
