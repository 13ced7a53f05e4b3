//! Per-module output directory and text artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::QcReportError;
use crate::source::{Classification, Section};
use crate::Result;

/// File holding the section's raw lines.
pub const REPORT_FILE: &str = "QC_report.txt";
/// File holding the pass/warn/fail token.
pub const CLASSIFICATION_FILE: &str = "filter.txt";

/// Asks whether an existing module directory may be overwritten.
pub trait OverwritePrompt {
    /// `Ok(true)` to proceed, `Ok(false)` to abort the whole run.
    fn confirm_overwrite(&mut self, module: &str, dir: &Path) -> Result<bool>;
}

/// Gives the same answer every time; for non-interactive use.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl OverwritePrompt for FixedAnswer {
    fn confirm_overwrite(&mut self, _module: &str, _dir: &Path) -> Result<bool> {
        Ok(self.0)
    }
}

/// Directory name for a module: spaces become underscores.
pub fn module_dir_name(module: &str) -> String {
    module.replace(' ', "_")
}

/// Create (or confirm reuse of) the module directory under `root`.
pub fn prepare_module_dir(
    root: &Path,
    module: &str,
    prompt: &mut dyn OverwritePrompt,
) -> Result<PathBuf> {
    let dir = root.join(module_dir_name(module));

    if dir.exists() {
        debug!(module, dir = %dir.display(), "module directory already exists");
        if !prompt.confirm_overwrite(module, &dir)? {
            return Err(QcReportError::OverwriteDeclined {
                module: module.to_string(),
            });
        }
    } else {
        fs::create_dir_all(&dir)?;
        debug!(module, dir = %dir.display(), "module directory created");
    }

    Ok(dir)
}

/// Write the section text verbatim.
pub fn write_report(dir: &Path, section: &Section) -> Result<PathBuf> {
    let path = dir.join(REPORT_FILE);
    fs::write(&path, section.to_text())?;
    Ok(path)
}

/// Write the classification token on a single line.
pub fn write_classification(dir: &Path, classification: &Classification) -> Result<PathBuf> {
    let path = dir.join(CLASSIFICATION_FILE);
    fs::write(&path, format!("{}\n", classification))?;
    Ok(path)
}
