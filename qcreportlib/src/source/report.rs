//! Loading a FastQC report from disk.
//!
//! The report is read once, up front, and shared read-only by every module
//! run. Each run captures its own [`Section`] out of it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::QcReportError;
use crate::Result;

use super::section::{extract_section, Section};

/// A full report body held in memory.
#[derive(Debug, Clone)]
pub struct Report {
    path: PathBuf,
    text: String,
}

impl Report {
    /// Read a report file.
    ///
    /// Fails with [`QcReportError::InputNotFound`] before touching the file
    /// contents when the path does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(QcReportError::InputNotFound(path.to_path_buf()));
        }

        let text = fs::read_to_string(path).map_err(|source| QcReportError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "report loaded");

        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    /// Wrap report text that did not come from a file.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            path: PathBuf::new(),
            text: text.into(),
        }
    }

    /// Path the report was read from (empty for in-memory reports).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw report text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Capture the section for `name`, failing if it is absent.
    pub fn section(&self, name: &str) -> Result<Section> {
        let section = extract_section(&self.text, name);
        if section.is_empty() {
            return Err(QcReportError::MissingSection {
                module: name.to_string(),
            });
        }
        Ok(section)
    }

    /// Quality score encoding from the `Encoding` line, if the report has one.
    pub fn encoding(&self) -> Option<&str> {
        self.text
            .lines()
            .find(|line| line.starts_with("Encoding"))
            .and_then(|line| line.split('\t').nth(1))
            .map(|value| value.trim_end_matches('\r'))
    }
}
