//! Query processing: index, rank, sort and reshape typed tables.
//!
//! This module handles the third stage of the pipeline - turning a freshly
//! cast table into the shape a module presents. It provides:
//!
//! - **Options**: Ordering configuration (`Ordering`, `OrderDirection`)
//! - **Transforms**: Declarative shaping steps (`IndexBy`, `TopK`, `Pivot`, ...)
//!
//! ## Example
//!
//! ```rust,ignore
//! use qcreportlib::query::{shape, Ordering, Transform};
//!
//! let data = shape(
//!     table,
//!     &[
//!         Transform::IndexBy("Max Obs/Exp Position"),
//!         Transform::TopK { by: "Count", k: 6 },
//!     ],
//! )?;
//! ```

pub mod options;
pub mod transform;

pub use options::{OrderDirection, Ordering};
pub use transform::{shape, Transform};
