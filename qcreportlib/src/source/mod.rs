//! Source capture: read the report and cut out module sections.
//!
//! This module handles the first stage of the pipeline - getting the raw
//! lines a module works on. It provides:
//!
//! - **Report loading**: Read the input once, fail early if it is missing
//! - **Section extraction**: Capture one module's block between its markers
//!
//! ## Example
//!
//! ```rust,ignore
//! use qcreportlib::source::Report;
//!
//! let report = Report::open("fastqc_data.txt")?;
//! let section = report.section("Per base sequence quality")?;
//! println!("{}", section.classification()?);
//! ```

pub mod report;
pub mod section;

pub use report::Report;
pub use section::{extract_section, Classification, Section, END_MARKER, OPEN_MARKER};
