//! Data typing: tokenize section lines and cast them into typed tables.
//!
//! This module handles the second stage of the pipeline - turning captured
//! raw lines into records. It provides:
//!
//! - **Tokenizing**: Tab splitting and header normalization (`tokenize`)
//! - **Records**: Declared field types and positional casting (`FieldType`, `Value`)
//! - **Tables**: Flat and pivoted typed tables (`TypedTable`, `PivotTable`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use qcreportlib::data::{build_table, tokenize, FieldType, HeaderLayout};
//!
//! let tokens = tokenize(&section, HeaderLayout::STANDARD)?;
//! let table = build_table(&tokens, &[FieldType::Int, FieldType::Float])?;
//! ```

pub mod record;
pub mod table;
pub mod tokenize;

pub use record::{cast_row, FieldType, Record, Value};
pub use table::{build_table, PivotTable, TableData, TypedTable};
pub use tokenize::{normalize_column, split_line, tokenize, HeaderLayout, TokenizedSection};
