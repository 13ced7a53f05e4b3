//! Typed tables built from tokenized sections.
//!
//! A [`TypedTable`] is one record per data line, every record cast to the same
//! shape. A [`PivotTable`] is the wide form produced by reshaping a long
//! three-column table. Both are wrapped in [`TableData`] so downstream
//! consumers (chart builders, JSON output) take a single type.

use serde::Serialize;
use tracing::debug;

use crate::error::QcReportError;
use crate::Result;

use super::record::{cast_row, FieldType, Record, Value};
use super::tokenize::{TokenizedSection, COLUMN_MARKER};

/// Records of one section, all sharing the column set's shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedTable {
    /// Module the table was built for
    pub module: String,
    /// Column names in field order
    pub columns: Vec<String>,
    /// Designated key column, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Data rows
    pub records: Vec<Record>,
    /// Values from aggregate rows above the column header
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<Value>,
    /// Section line holding the column header (1-based)
    #[serde(skip)]
    pub header_line: usize,
}

impl TypedTable {
    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| QcReportError::format(&self.module, self.header_line, missing_column(name)))
    }

    /// Name of the key column.
    pub fn index_name(&self) -> Option<&str> {
        self.index.map(|i| self.columns[i].as_str())
    }

    /// Values of the key column, in record order.
    pub fn index_values(&self) -> Vec<&Value> {
        match self.index {
            Some(i) => self.records.iter().map(|r| &r.values()[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Values of a column, in record order.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        let i = self.column_index(name)?;
        Ok(self.records.iter().map(|r| &r.values()[i]).collect())
    }

    /// Numeric values of a column; fails if the column holds text.
    pub fn floats(&self, name: &str) -> Result<Vec<f64>> {
        self.column(name)?
            .into_iter()
            .map(|v| {
                v.as_f64().ok_or_else(|| {
                    QcReportError::format(
                        &self.module,
                        self.header_line,
                        format!("column '{}' is not numeric", name),
                    )
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Wide table keyed by two columns of a long table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    pub module: String,
    /// Column whose values became row keys
    pub row_key: String,
    /// Column whose values became column keys
    pub column_key: String,
    /// Column whose values fill the cells
    pub value_key: String,
    pub rows: Vec<Value>,
    pub columns: Vec<Value>,
    /// `cells[row][column]`; `None` where the long table had no entry
    pub cells: Vec<Vec<Option<f64>>>,
}

/// Either shape a module can produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TableData {
    Flat(TypedTable),
    Pivot(PivotTable),
}

impl TableData {
    pub fn module(&self) -> &str {
        match self {
            TableData::Flat(t) => &t.module,
            TableData::Pivot(p) => &p.module,
        }
    }

    pub fn as_flat(&self) -> Option<&TypedTable> {
        match self {
            TableData::Flat(t) => Some(t),
            TableData::Pivot(_) => None,
        }
    }

    pub fn as_pivot(&self) -> Option<&PivotTable> {
        match self {
            TableData::Pivot(p) => Some(p),
            TableData::Flat(_) => None,
        }
    }
}

pub(crate) fn missing_column(name: &str) -> String {
    format!("column '{}' not found", name)
}

/// Cast every data row of `tokens` to `shape`.
///
/// The header must declare exactly one column per field. Summary rows are
/// cast too: marker-prefixed fields become text labels, everything else must
/// be a number.
pub fn build_table(tokens: &TokenizedSection, shape: &[FieldType]) -> Result<TypedTable> {
    let module = tokens.module();
    let layout = tokens.layout();

    if tokens.columns().len() != shape.len() {
        return Err(QcReportError::format(
            module,
            layout.header_index() + 1,
            format!(
                "expected {} columns, found {}",
                shape.len(),
                tokens.columns().len()
            ),
        ));
    }

    let mut summary = Vec::new();
    for (offset, row) in tokens.summary_rows().iter().enumerate() {
        for field in row {
            summary.push(cast_summary_field(field).map_err(|message| {
                QcReportError::format(module, offset + 2, message)
            })?);
        }
    }

    let records = tokens
        .data_rows()
        .iter()
        .enumerate()
        .map(|(offset, row)| {
            cast_row(row, shape).map_err(|message| {
                QcReportError::format(module, layout.data_start() + offset + 1, message)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(module, records = records.len(), "typed table built");
    Ok(TypedTable {
        module: module.to_string(),
        columns: tokens.columns().to_vec(),
        index: None,
        records,
        summary,
        header_line: layout.header_index() + 1,
    })
}

fn cast_summary_field(field: &str) -> std::result::Result<Value, String> {
    match field.strip_prefix(COLUMN_MARKER) {
        Some(label) => Ok(Value::Text(label.to_string())),
        None => FieldType::Float.cast(field),
    }
}
