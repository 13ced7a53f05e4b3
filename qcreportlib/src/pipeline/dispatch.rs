//! Running modules against one report.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::data::table::TableData;
use crate::modules::{fixed_modules, ModuleId, Selection, REGISTRY};
use crate::source::{Classification, Report};
use crate::Result;

use super::lifecycle::{execute, Collaborators, ModuleRun, Stage};

/// Options for a report run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// FastQC data file to read
    pub input: PathBuf,
    /// Directory module directories are created under
    pub output_root: PathBuf,
    /// Selectable modules to run after the fixed ones
    pub selection: Selection,
}

impl RunOptions {
    /// Create options for `input`, writing under `output_root`.
    pub fn new(input: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_root: output_root.into(),
            selection: Selection::None,
        }
    }

    /// Set the module selection.
    pub fn select(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Run every selectable module.
    pub fn all(self) -> Self {
        self.select(Selection::All)
    }

    /// Add one module to an explicit selection.
    pub fn module(mut self, id: ModuleId) -> Self {
        self.selection = match self.selection {
            Selection::All => Selection::All,
            Selection::Only(mut ids) => {
                ids.insert(id);
                Selection::Only(ids)
            }
            Selection::None => Selection::only([id]),
        };
        self
    }
}

/// What one module run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleOutcome {
    pub id: ModuleId,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    pub artifacts: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableData>,
}

impl From<ModuleRun<'_>> for ModuleOutcome {
    fn from(run: ModuleRun<'_>) -> Self {
        Self {
            id: run.descriptor.id,
            stage: run.stage,
            classification: run.classification,
            artifacts: run.artifacts,
            table: run.table,
        }
    }
}

/// Run a single module against an already loaded report.
///
/// Every call starts from a fresh [`ModuleRun`]; nothing carries over between
/// modules.
pub fn run_module(
    id: ModuleId,
    report: &Report,
    output_root: &Path,
    collab: &mut Collaborators<'_>,
) -> Result<ModuleOutcome> {
    let run = execute(ModuleRun::new(id.descriptor(), report, output_root), collab)?;
    Ok(run.into())
}

/// Run the fixed modules, then the selected ones, in registry order.
///
/// The first failing module aborts the run; outcomes of modules that already
/// completed are discarded with it.
pub fn run(options: &RunOptions, collab: &mut Collaborators<'_>) -> Result<Vec<ModuleOutcome>> {
    let report = Report::open(&options.input)?;
    let root = options.output_root.as_path();
    info!(
        input = %options.input.display(),
        output = %root.display(),
        "report run started"
    );

    let mut outcomes = Vec::new();
    for descriptor in fixed_modules() {
        outcomes.push(run_module(descriptor.id, &report, root, collab)?);
    }

    let run_all = options.selection.is_all();
    if run_all {
        writeln!(
            collab.out,
            "Generating reports and graphs for all remaining analysis..."
        )?;
    }

    let final_module = REGISTRY.last().map(|d| d.id);
    for descriptor in options.selection.modules() {
        outcomes.push(run_module(descriptor.id, &report, root, collab)?);
        if run_all && Some(descriptor.id) == final_module {
            writeln!(collab.out, "All module reports have been created.")?;
        }
    }

    info!(modules = outcomes.len(), "report run finished");
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QcReportError;
    use crate::output::{FixedAnswer, JsonChartRenderer};
    use std::fs;
    use tempfile::tempdir;

    const REPORT: &str = "##FastQC\t0.11.9\n\
>>Basic Statistics\tpass\n\
#Measure\tValue\n\
Filename\treads.fastq\n\
>>END_MODULE\n\
>>Per base N content\tpass\n\
#Base\tN-Count\n\
1\t0.0\n\
>>END_MODULE\n\
>>Overrepresented sequences\twarn\n\
#Sequence\tCount\tPercentage\tPossible Source\n\
>>END_MODULE\n";

    fn run_with(options: &RunOptions) -> (Result<Vec<ModuleOutcome>>, String) {
        let mut out = Vec::new();
        let mut prompt = FixedAnswer(true);
        let mut collab = Collaborators {
            out: &mut out,
            prompt: &mut prompt,
            renderer: &JsonChartRenderer,
        };
        let result = run(options, &mut collab);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_options_builder() {
        let options = RunOptions::new("in.txt", "out")
            .module(ModuleId::KmerContent)
            .module(ModuleId::AdapterContent);
        assert_eq!(
            options.selection,
            Selection::only([ModuleId::AdapterContent, ModuleId::KmerContent])
        );
        assert!(RunOptions::new("in.txt", "out").all().selection.is_all());
        assert!(RunOptions::new("in.txt", "out")
            .all()
            .module(ModuleId::KmerContent)
            .selection
            .is_all());
    }

    #[test]
    fn test_missing_input_reported_first() {
        let root = tempdir().unwrap();
        let options = RunOptions::new(root.path().join("nope.txt"), root.path()).all();
        let (result, out) = run_with(&options);
        assert!(matches!(result, Err(QcReportError::InputNotFound(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_basic_statistics_always_runs() {
        let root = tempdir().unwrap();
        let input = root.path().join("fastqc_data.txt");
        fs::write(&input, REPORT).unwrap();

        let (result, out) = run_with(&RunOptions::new(&input, root.path()));
        let outcomes = result.unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].id, ModuleId::BasicStatistics);
        assert_eq!(outcomes[0].stage, Stage::Completed);
        assert!(out.contains("Filename\treads.fastq"));
    }

    #[test]
    fn test_selected_modules_run_in_registry_order() {
        let root = tempdir().unwrap();
        let input = root.path().join("fastqc_data.txt");
        fs::write(&input, REPORT).unwrap();

        let options = RunOptions::new(&input, root.path())
            .module(ModuleId::OverrepresentedSeqs)
            .module(ModuleId::PerBaseNContent);
        let (result, out) = run_with(&options);
        let ids: Vec<_> = result.unwrap().iter().map(|o| o.id).collect();

        assert_eq!(
            ids,
            vec![
                ModuleId::BasicStatistics,
                ModuleId::PerBaseNContent,
                ModuleId::OverrepresentedSeqs
            ]
        );
        assert!(!out.contains("All module reports have been created."));
        assert_eq!(
            fs::read_to_string(root.path().join("Overrepresented_sequences/filter.txt")).unwrap(),
            "warn\n"
        );
    }

    #[test]
    fn test_run_all_stops_at_first_missing_section() {
        let root = tempdir().unwrap();
        let input = root.path().join("fastqc_data.txt");
        fs::write(&input, REPORT).unwrap();

        let (result, out) = run_with(&RunOptions::new(&input, root.path()).all());
        match result {
            Err(QcReportError::MissingSection { module }) => {
                assert_eq!(module, "Per base sequence quality")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(out.contains("Generating reports and graphs for all remaining analysis..."));
        assert!(!root.path().join("Per_base_sequence_quality").exists());
    }
}
