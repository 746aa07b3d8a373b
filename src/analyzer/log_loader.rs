//! File ingestion for log text.
//!
//! Reads a `.log` or `.txt` file fully into memory; the analyzer works on the
//! complete text in a single pass.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};

/// Buffer size for reading log files (8KB).
const BUFFER_SIZE: usize = 8 * 1024;

/// Extensions accepted by [`LogLoader::open`], compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["log", "txt"];

/// Source name used when the text did not come from a file.
pub const PASTED_SOURCE_NAME: &str = "pasted-content";

/// Log text together with the name of the source it came from.
#[derive(Debug, Clone)]
pub struct LogLoader {
    source_name: String,
    content: String,
}

impl LogLoader {
    /// Open and read a log file.
    ///
    /// # Parameters
    ///
    /// * `path` - Path to a `.log` or `.txt` file
    ///
    /// # Returns
    ///
    /// `Ok(LogLoader)` holding the file content, `Err` for unsupported
    /// extensions or I/O failures. Invalid UTF-8 is replaced lossily.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !has_supported_extension(path) {
            return Err(AnalyzerError::UnsupportedFileType { path: path.to_path_buf() });
        }

        let io_err = |source| AnalyzerError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(io_err)?;

        let source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        log::info!("Loaded {} ({} bytes)", source_name, bytes.len());

        Ok(Self {
            source_name,
            content: decode(&bytes),
        })
    }

    /// Read all text from an arbitrary reader, such as stdin.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|source| AnalyzerError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        })?;

        Ok(Self::from_text(decode(&bytes)))
    }

    /// Wrap text that was supplied directly.
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            source_name: PASTED_SOURCE_NAME.to_string(),
            content: content.into(),
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

/// Decode bytes as UTF-8, replacing invalid sequences and dropping a leading byte order mark.
fn decode(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text.into_owned(),
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.iter().any(|s| ext.eq_ignore_ascii_case(s)))
}
