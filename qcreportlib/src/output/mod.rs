//! Output artifacts: module directories, text files and chart specs.
//!
//! This module handles the last stage of the pipeline - putting a module's
//! results on disk. It provides:
//!
//! - **Directories**: One per module under the output root, with an
//!   overwrite confirmation hook (`OverwritePrompt`)
//! - **Text artifacts**: `QC_report.txt` and `filter.txt`
//! - **Charts**: Declarative chart specs and a pluggable `ChartRenderer`

pub mod artifacts;
pub mod chart;

pub use artifacts::{
    module_dir_name, prepare_module_dir, write_classification, write_report, FixedAnswer,
    OverwritePrompt, CLASSIFICATION_FILE, REPORT_FILE,
};
pub use chart::{
    BoxStats, Chart, ChartKind, ChartRenderer, Heatmap, JsonChartRenderer, Point, Series,
    CHART_FILE,
};
