//! Module lifecycle and dispatch.
//!
//! - **Lifecycle**: The ordered steps one module walks, from locating its
//!   section to reporting completion (`lifecycle`)
//! - **Dispatch**: Loading the report once and running the fixed and selected
//!   modules in registry order (`dispatch`)
//!
//! Errors are returned, never acted on: deciding whether a failure ends the
//! process is left to the caller.

pub mod dispatch;
pub mod lifecycle;

pub use dispatch::{run, run_module, ModuleOutcome, RunOptions};
pub use lifecycle::{execute, Collaborators, ModuleRun, Stage, Step, STEPS};
