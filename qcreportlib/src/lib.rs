//! # qcreportlib
//!
//! Turns a FastQC `fastqc_data.txt` report into per-module artifacts: the raw
//! section text, its pass/warn/fail classification, and a chart spec built
//! from the section's typed table.
//!
//! ## Overview
//!
//! A FastQC report is a sequence of `>>Module Name\tclassification` sections,
//! each closed by `>>END_MODULE`. Every module shares one pipeline:
//!
//! - **Source**: Load the report and capture one module's section
//! - **Data**: Tokenize the section and cast each row to the module's field types
//! - **Query**: Shape the typed table (key column, top-K, pivot)
//! - **Modules**: A static registry describing what each module produces
//! - **Pipeline**: The ordered lifecycle steps and the dispatcher
//! - **Output**: Module directories, text artifacts and chart rendering
//!
//! Modules differ only in their descriptor data; none has its own code path.
//!
//! ## Example
//!
//! ```rust
//! use qcreportlib::{
//!     run_module, Collaborators, FixedAnswer, JsonChartRenderer, ModuleId, Report,
//! };
//! use tempfile::tempdir;
//!
//! let report = Report::from_text(
//!     ">>Per base N content\tpass\n#Base\tN-Count\n1\t0.0\n2\t0.1\n>>END_MODULE\n",
//! );
//! let out_dir = tempdir().unwrap();
//!
//! let mut out = Vec::new();
//! let mut prompt = FixedAnswer(false);
//! let mut collab = Collaborators {
//!     out: &mut out,
//!     prompt: &mut prompt,
//!     renderer: &JsonChartRenderer,
//! };
//!
//! let outcome =
//!     run_module(ModuleId::PerBaseNContent, &report, out_dir.path(), &mut collab).unwrap();
//! // QC_report.txt, filter.txt and graph.json
//! assert_eq!(outcome.artifacts.len(), 3);
//! assert_eq!(outcome.table.unwrap().as_flat().unwrap().len(), 2);
//! ```

pub mod data;
pub mod error;
pub mod modules;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod source;

pub use data::{FieldType, HeaderLayout, PivotTable, Record, TableData, TypedTable, Value};
pub use error::QcReportError;
pub use modules::{ModuleDescriptor, ModuleId, Selection, REGISTRY};
pub use output::{
    Chart, ChartKind, ChartRenderer, FixedAnswer, JsonChartRenderer, OverwritePrompt,
};
pub use pipeline::{run, run_module, Collaborators, ModuleOutcome, RunOptions, Stage};
pub use query::{OrderDirection, Ordering, Transform};
pub use source::{extract_section, Classification, Report, Section};

/// Result type for qcreportlib operations
pub type Result<T> = std::result::Result<T, QcReportError>;
