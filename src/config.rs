//! Configuration loading for the analyzer front end.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};

/// File name looked up next to the analyzed log when no config path is given.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "workflow-analyzer.toml";

/// Default threshold below which entries count as rare.
pub const DEFAULT_MIN_OCCURRENCES: usize = 5;

/// Presentation and export settings. The parsing rules themselves are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AnalyzerConfig {
    /// Threshold used when rare entries are hidden
    pub min_occurrences: usize,
    /// Number of leading rows highlighted in the table
    pub highlight_top: usize,
    /// Default CSV output file name
    pub csv_file_name: String,
    /// Print the scrambled log text after the report
    pub redact_after_analysis: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_occurrences: DEFAULT_MIN_OCCURRENCES,
            highlight_top: 3,
            csv_file_name: "workflow_analysis.csv".to_string(),
            redact_after_analysis: false,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the TOML file
    ///
    /// # Returns
    /// * `Ok(AnalyzerConfig)` with defaults filled in for missing keys
    /// * `Err(AnalyzerError::Config)` if the file cannot be read or parsed
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .map_err(|e| AnalyzerError::Config(format!("Failed to read config file {:?}: {}", config_path, e)))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AnalyzerError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Derive the config path from a log file path.
    ///
    /// Replaces the log filename with [`DEFAULT_CONFIG_FILE_NAME`] in the same directory.
    pub fn config_path_from_log(log_path: &Path) -> PathBuf {
        log_path.parent().unwrap_or(Path::new(".")).join(DEFAULT_CONFIG_FILE_NAME)
    }
}
