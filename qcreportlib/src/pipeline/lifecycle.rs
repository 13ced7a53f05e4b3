//! Per-module lifecycle.
//!
//! A module run is a [`ModuleRun`] value threaded through a fixed list of
//! [`STEPS`]. Each step takes the accumulated state and returns it updated,
//! or fails. A step a module does not need (no graph, no artifacts) leaves
//! the state untouched, so every module walks the same list.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::data::table::{build_table, TableData};
use crate::data::tokenize::tokenize;
use crate::error::QcReportError;
use crate::modules::ModuleDescriptor;
use crate::output::{
    prepare_module_dir, write_classification, write_report, ChartRenderer, OverwritePrompt,
};
use crate::query::shape;
use crate::source::{Classification, Report, Section};
use crate::Result;

/// Width of the rule printed after each completed module.
const RULE_WIDTH: usize = 80;

/// Where a module run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Created,
    SectionLocated,
    OutputPrepared,
    StatsDisplayed,
    ReportWritten,
    ClassificationWritten,
    TableBuilt,
    GraphRendered,
    Completed,
    /// Section absent from an optional module; nothing was produced
    Skipped,
}

/// State accumulated by one module run.
#[derive(Debug)]
pub struct ModuleRun<'r> {
    pub descriptor: &'static ModuleDescriptor,
    pub report: &'r Report,
    pub output_root: &'r Path,
    pub stage: Stage,
    pub section: Option<Section>,
    pub module_dir: Option<PathBuf>,
    pub classification: Option<Classification>,
    pub table: Option<TableData>,
    /// Files written so far, in write order
    pub artifacts: Vec<PathBuf>,
}

impl<'r> ModuleRun<'r> {
    pub fn new(
        descriptor: &'static ModuleDescriptor,
        report: &'r Report,
        output_root: &'r Path,
    ) -> Self {
        Self {
            descriptor,
            report,
            output_root,
            stage: Stage::Created,
            section: None,
            module_dir: None,
            classification: None,
            table: None,
            artifacts: Vec::new(),
        }
    }

    fn name(&self) -> &'static str {
        self.descriptor.name
    }

    fn section(&self) -> Result<&Section> {
        self.section.as_ref().ok_or_else(|| QcReportError::MissingSection {
            module: self.name().to_string(),
        })
    }

    fn module_dir(&self) -> Result<&Path> {
        self.module_dir.as_deref().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no output directory prepared for {}", self.name()),
            )
            .into()
        })
    }
}

/// External collaborators a run talks to.
pub struct Collaborators<'c> {
    /// Progress messages and displayed statistics
    pub out: &'c mut dyn Write,
    /// Consulted when a module directory already exists
    pub prompt: &'c mut dyn OverwritePrompt,
    /// Draws the module's chart
    pub renderer: &'c dyn ChartRenderer,
}

/// One lifecycle step.
pub type Step = for<'r, 'c> fn(ModuleRun<'r>, &mut Collaborators<'c>) -> Result<ModuleRun<'r>>;

/// Every step, in the order a module walks them.
pub const STEPS: [(&str, Step); 9] = [
    ("locate", locate),
    ("announce", announce),
    ("prepare", prepare),
    ("display_stats", display_stats),
    ("write_report", write_report_file),
    ("write_classification", write_classification_file),
    ("build_table", build_typed_table),
    ("render_graph", render_graph),
    ("complete", complete),
];

/// Drive `run` through every step.
///
/// Stops early, without error, once a step marks the run as skipped.
pub fn execute<'r>(mut run: ModuleRun<'r>, collab: &mut Collaborators<'_>) -> Result<ModuleRun<'r>> {
    for (name, step) in STEPS {
        run = step(run, collab)?;
        debug!(module = run.name(), step = name, stage = ?run.stage, "step finished");
        if run.stage == Stage::Skipped {
            break;
        }
    }
    Ok(run)
}

fn locate<'r>(mut run: ModuleRun<'r>, _: &mut Collaborators<'_>) -> Result<ModuleRun<'r>> {
    match run.report.section(run.name()) {
        Ok(section) => {
            run.section = Some(section);
            run.stage = Stage::SectionLocated;
        }
        Err(QcReportError::MissingSection { .. }) if !run.descriptor.required => {
            warn!(module = run.name(), "section absent, module skipped");
            run.stage = Stage::Skipped;
        }
        Err(e) => return Err(e),
    }
    Ok(run)
}

fn announce<'r>(run: ModuleRun<'r>, collab: &mut Collaborators<'_>) -> Result<ModuleRun<'r>> {
    writeln!(collab.out, "Generating output for {}...", run.name())?;
    Ok(run)
}

fn prepare<'r>(mut run: ModuleRun<'r>, collab: &mut Collaborators<'_>) -> Result<ModuleRun<'r>> {
    if !run.descriptor.artifacts {
        return Ok(run);
    }
    let dir = prepare_module_dir(run.output_root, run.name(), &mut *collab.prompt)?;
    run.module_dir = Some(dir);
    run.stage = Stage::OutputPrepared;
    Ok(run)
}

fn display_stats<'r>(
    mut run: ModuleRun<'r>,
    collab: &mut Collaborators<'_>,
) -> Result<ModuleRun<'r>> {
    if !run.descriptor.display_stats {
        return Ok(run);
    }
    writeln!(collab.out, "{}", run.section()?.to_text())?;
    run.stage = Stage::StatsDisplayed;
    Ok(run)
}

fn write_report_file<'r>(
    mut run: ModuleRun<'r>,
    collab: &mut Collaborators<'_>,
) -> Result<ModuleRun<'r>> {
    if !run.descriptor.artifacts {
        return Ok(run);
    }
    let path = write_report(run.module_dir()?, run.section()?)?;
    writeln!(collab.out, "Report text file generated for {}.", run.name())?;
    run.artifacts.push(path);
    run.stage = Stage::ReportWritten;
    Ok(run)
}

fn write_classification_file<'r>(
    mut run: ModuleRun<'r>,
    collab: &mut Collaborators<'_>,
) -> Result<ModuleRun<'r>> {
    if !run.descriptor.artifacts {
        return Ok(run);
    }
    let classification = run.section()?.classification()?;
    let path = write_classification(run.module_dir()?, &classification)?;
    writeln!(collab.out, "Filter text file generated for {}.", run.name())?;
    run.classification = Some(classification);
    run.artifacts.push(path);
    run.stage = Stage::ClassificationWritten;
    Ok(run)
}

fn build_typed_table<'r>(
    mut run: ModuleRun<'r>,
    _: &mut Collaborators<'_>,
) -> Result<ModuleRun<'r>> {
    let Some(spec) = run.descriptor.table else {
        return Ok(run);
    };
    let tokens = tokenize(run.section()?, spec.layout)?;
    let table = build_table(&tokens, spec.fields)?;
    run.table = Some(shape(table, spec.transforms)?);
    run.stage = Stage::TableBuilt;
    Ok(run)
}

fn render_graph<'r>(
    mut run: ModuleRun<'r>,
    collab: &mut Collaborators<'_>,
) -> Result<ModuleRun<'r>> {
    let (Some(spec), Some(table)) = (run.descriptor.table, run.table.as_ref()) else {
        return Ok(run);
    };
    let chart = (spec.chart)(table, run.report)?;
    let path = collab.renderer.render(&chart, run.module_dir()?)?;
    writeln!(collab.out, "Graph file generated for {}.", run.name())?;
    run.artifacts.push(path);
    run.stage = Stage::GraphRendered;
    Ok(run)
}

fn complete<'r>(mut run: ModuleRun<'r>, collab: &mut Collaborators<'_>) -> Result<ModuleRun<'r>> {
    writeln!(collab.out, "Completed.\n{}", "-".repeat(RULE_WIDTH))?;
    info!(module = run.name(), artifacts = run.artifacts.len(), "module completed");
    run.stage = Stage::Completed;
    Ok(run)
}
