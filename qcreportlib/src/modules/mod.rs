//! The catalogue of report modules.
//!
//! Each FastQC module is plain data: a [`ModuleDescriptor`] in the static
//! [`REGISTRY`]. The pipeline reads descriptors to decide what to do, so the
//! lifecycle code has no per-module branches.
//!
//! - **Descriptors**: Names, flags and output switches (`descriptor`)
//! - **Registry**: Run order, lookup and caller selection (`registry`)
//! - **Charts**: One chart builder per tabular module (`charts`)

mod charts;
pub mod descriptor;
pub mod registry;

pub use descriptor::{ChartBuilder, ModuleDescriptor, ModuleId, TableSpec};
pub use registry::{
    descriptor, fixed_modules, selectable_modules, Selection, KMER_TOP_K, REGISTRY,
};
