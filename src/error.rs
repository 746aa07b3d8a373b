//! Error types shared by the analyzer and its surrounding glue.

use std::path::PathBuf;

/// Errors surfaced by the library.
///
/// The parsing engine itself only ever produces [`AnalyzerError::InvalidInput`];
/// the remaining variants belong to ingestion, configuration and export.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// The text handed to `analyze` was empty or whitespace only.
    #[error("log content is empty; provide log content to analyze")]
    InvalidInput,

    /// A log file with an extension other than `.log` or `.txt`.
    #[error("unsupported file type {path:?}: expected a .log or .txt file")]
    UnsupportedFileType { path: PathBuf },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load config: {0}")]
    Config(String),

    #[error("failed to write CSV export: {0}")]
    Export(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
