//! Error types for qcreportlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting and processing report sections
#[derive(Error, Debug)]
pub enum QcReportError {
    /// Input report does not exist
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Failed to read the input report
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The requested section marker is absent from the report
    #[error("module \"{module}\" missing from input file")]
    MissingSection { module: String },

    /// A section row does not have the shape the module declares
    #[error("module \"{module}\" data is not in FastQC format (line {line}): {message}")]
    Format {
        module: String,
        line: usize,
        message: String,
    },

    /// A table is the wrong shape for the step consuming it
    #[error("module \"{module}\" table cannot be used here: {message}")]
    TableShape { module: String, message: String },

    /// The user refused to overwrite an existing module directory
    #[error("refused to overwrite output for module \"{module}\"")]
    OverwriteDeclined { module: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QcReportError {
    /// Build a format error; `line` is 1-based within the section.
    pub(crate) fn format(module: &str, line: usize, message: impl Into<String>) -> Self {
        QcReportError::Format {
            module: module.to_string(),
            line,
            message: message.into(),
        }
    }

    /// Build a table shape error; these have no single source line.
    pub(crate) fn table_shape(module: &str, message: impl Into<String>) -> Self {
        QcReportError::TableShape {
            module: module.to_string(),
            message: message.into(),
        }
    }

    /// Whether this error stems from the user declining an overwrite.
    pub fn is_declined(&self) -> bool {
        matches!(self, QcReportError::OverwriteDeclined { .. })
    }
}
