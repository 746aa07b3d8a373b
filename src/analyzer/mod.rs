//! Analyzer module for workflow/workstep log parsing.
//!
//! Provides functionality for:
//! - Recognizing workflow/workstep pairs in individual lines (`log_parser`)
//! - Normalizing captured text into aggregation keys (`normalize`)
//! - Aggregating a whole log into a ranked report (`engine`)
//! - Loading log text from files or readers (`log_loader`)

pub mod engine;
pub mod log_loader;
pub mod log_parser;
pub mod normalize;
pub mod types;

pub use engine::analyze;
pub use log_loader::LogLoader;
pub use log_parser::{LineMatch, PatternRule, RawMatch, match_line};
pub use normalize::normalize_text;
pub use types::{AnalysisReport, WorkflowGroup, WorkflowStepCount, WorkflowStepKey};
