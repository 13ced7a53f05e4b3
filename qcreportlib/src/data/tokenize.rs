//! Row tokenizer and column normalizer.
//!
//! Every captured line is split on tabs. Line 0 is the section header, then
//! come zero or more summary rows, then the column header row, then data.

use crate::error::QcReportError;
use crate::source::Section;
use crate::Result;

/// Marker character that prefixes header tokens.
pub const COLUMN_MARKER: char = '#';

/// Where the column header row sits inside a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    summary_rows: usize,
}

impl HeaderLayout {
    /// Column headers directly under the section header.
    pub const STANDARD: HeaderLayout = HeaderLayout { summary_rows: 0 };

    /// `rows` aggregate lines sit between the section header and the column headers.
    pub const fn with_summary(rows: usize) -> Self {
        HeaderLayout { summary_rows: rows }
    }

    pub fn summary_rows(&self) -> usize {
        self.summary_rows
    }

    /// Index of the column header row.
    pub fn header_index(&self) -> usize {
        1 + self.summary_rows
    }

    /// Index of the first data row.
    pub fn data_start(&self) -> usize {
        self.header_index() + 1
    }
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A section split into fields, with normalized column names.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizedSection {
    module: String,
    layout: HeaderLayout,
    lines: Vec<Vec<String>>,
    columns: Vec<String>,
}

impl TokenizedSection {
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn layout(&self) -> HeaderLayout {
        self.layout
    }

    /// All tokenized lines, including section header and summary rows.
    pub fn lines(&self) -> &[Vec<String>] {
        &self.lines
    }

    /// Column names from the header row, marker stripped.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Aggregate rows between the section header and the column header.
    pub fn summary_rows(&self) -> &[Vec<String>] {
        &self.lines[1..self.layout.header_index()]
    }

    /// Data rows after the column header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.lines[self.layout.data_start()..]
    }
}

/// Split a single line on tabs after dropping its terminator.
pub fn split_line(line: &str) -> Vec<String> {
    line.trim_end_matches('\n')
        .trim_end_matches('\r')
        .split('\t')
        .map(str::to_string)
        .collect()
}

/// Remove one leading marker from a header token.
pub fn normalize_column(token: &str) -> String {
    token.strip_prefix(COLUMN_MARKER).unwrap_or(token).to_string()
}

/// Tokenize a captured section according to `layout`.
pub fn tokenize(section: &Section, layout: HeaderLayout) -> Result<TokenizedSection> {
    let lines: Vec<Vec<String>> = section.lines().iter().map(|l| split_line(l)).collect();

    let header = lines.get(layout.header_index()).ok_or_else(|| {
        QcReportError::format(
            section.name(),
            layout.header_index() + 1,
            "section has no column header row",
        )
    })?;
    let columns = header.iter().map(|t| normalize_column(t)).collect();

    Ok(TokenizedSection {
        module: section.name().to_string(),
        layout,
        lines,
        columns,
    })
}
