//! Section capture.
//!
//! A report is a flat sequence of blocks:
//!
//! ```text
//! >>Per base sequence quality\tpass
//! #Base\tMean\tMedian\t...
//! 1\t32.1\t33.0\t...
//! >>END_MODULE
//! ```
//!
//! Blocks never nest, so a single forward scan is enough: find the first line
//! that starts with `>>` followed by the module name, then take every line up
//! to (not including) the next line starting with `>>END`.

use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::QcReportError;
use crate::Result;

/// Prefix that opens a section.
pub const OPEN_MARKER: &str = ">>";
/// Prefix that closes a section.
pub const END_MARKER: &str = ">>END";

/// The raw lines of one module's section, line terminators included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    lines: Vec<String>,
}

impl Section {
    /// Module name this section was captured for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Captured lines in report order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The captured lines joined back together, exactly as they appeared.
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    /// The pass/warn/fail token from the section's opening line.
    pub fn classification(&self) -> Result<Classification> {
        let header = self.lines.first().ok_or_else(|| QcReportError::MissingSection {
            module: self.name.clone(),
        })?;
        let token = header
            .trim_end_matches(['\n', '\r'])
            .split('\t')
            .nth(1)
            .ok_or_else(|| {
                QcReportError::format(&self.name, 1, "section header has no classification token")
            })?;
        Ok(token.parse().unwrap_or_else(|_| Classification::Other(token.to_string())))
    }
}

/// Capture the section for `name` from `text`.
///
/// Returns an empty section when no opening marker for `name` exists.
pub fn extract_section(text: &str, name: &str) -> Section {
    let mut lines = text.split_inclusive('\n');
    let mut captured = Vec::new();

    for line in lines.by_ref() {
        if is_open_marker(line, name) {
            captured.push(line.to_string());
            break;
        }
    }

    if !captured.is_empty() {
        for line in lines {
            if line.starts_with(END_MARKER) {
                break;
            }
            captured.push(line.to_string());
        }
    }

    debug!(module = name, lines = captured.len(), "section captured");
    Section {
        name: name.to_string(),
        lines: captured,
    }
}

fn is_open_marker(line: &str, name: &str) -> bool {
    line.strip_prefix(OPEN_MARKER)
        .is_some_and(|rest| rest.starts_with(name))
}

/// Outcome attached to a section header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Pass,
    Warn,
    Fail,
    /// Any other token, kept as written.
    Other(String),
}

impl Classification {
    pub fn as_str(&self) -> &str {
        match self {
            Classification::Pass => "pass",
            Classification::Warn => "warn",
            Classification::Fail => "fail",
            Classification::Other(token) => token,
        }
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pass" => Ok(Classification::Pass),
            "warn" => Ok(Classification::Warn),
            "fail" => Ok(Classification::Fail),
            _ => Err(format!("Unknown classification: {}", s)),
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
