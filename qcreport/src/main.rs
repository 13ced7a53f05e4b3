//! # qcreport
//!
//! A CLI tool that turns a FastQC data file into per-module report folders.
//!
//! ## Overview
//!
//! qcreport is built on top of qcreportlib. Basic Statistics is always shown
//! on the terminal; every other FastQC module is opt-in and, when selected,
//! gets its own directory under the output root holding:
//!
//! - `QC_report.txt`: the module's section, verbatim
//! - `filter.txt`: the pass/warn/fail classification
//! - `graph.json`: a chart spec built from the module's table (tabular modules only)
//!
//! ## Usage
//!
//! ```bash
//! # Show basic statistics only
//! qcreport fastqc_data.txt out/
//!
//! # Per base sequence quality and Kmer Content
//! qcreport fastqc_data.txt out/ --per-base-seq-qlty --m12
//!
//! # Every module
//! qcreport fastqc_data.txt out/ --all
//! ```

mod prompt;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::{Style, Term};
use qcreportlib::modules::selectable_modules;
use qcreportlib::{run, Collaborators, JsonChartRenderer, QcReportError, RunOptions, Selection};
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::prompt::TerminalPrompt;

/// Build the clap Command structure
fn build_command() -> Command {
    let cmd = Command::new("qcreport")
        .version(env!("CARGO_PKG_VERSION"))
        .about("FastQC report generator and QC module visualiser")
        .arg(
            Arg::new("fastqc_file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("FastQC file for parsing"),
        )
        .arg(
            Arg::new("outdir")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Output directory"),
        )
        .arg(
            Arg::new("all")
                .short('a')
                .long("all")
                .action(ArgAction::SetTrue)
                .help("All QC analysis"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log progress details to stderr"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Log debugging details to stderr"),
        );

    selectable_modules().fold(cmd, |cmd, module| {
        cmd.arg(
            Arg::new(module.flag)
                .long(module.flag)
                .visible_alias(module.alias)
                .action(ArgAction::SetTrue)
                .help(module.help),
        )
    })
}

fn init_tracing(matches: &ArgMatches) {
    let filter = if matches.get_flag("debug") {
        EnvFilter::new("debug")
    } else if matches.get_flag("verbose") {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_options(matches: &ArgMatches) -> anyhow::Result<RunOptions> {
    let input = matches
        .get_one::<PathBuf>("fastqc_file")
        .ok_or_else(|| anyhow::anyhow!("missing fastqc_file argument"))?;
    let outdir = matches
        .get_one::<PathBuf>("outdir")
        .ok_or_else(|| anyhow::anyhow!("missing outdir argument"))?;

    let selection = if matches.get_flag("all") {
        Selection::All
    } else {
        let chosen: Vec<_> = selectable_modules()
            .filter(|m| matches.get_flag(m.flag))
            .map(|m| m.id)
            .collect();
        if chosen.is_empty() {
            Selection::None
        } else {
            Selection::only(chosen)
        }
    };
    debug!(?selection, "modules selected");

    Ok(RunOptions::new(input, outdir).select(selection))
}

fn run_report(matches: &ArgMatches) -> anyhow::Result<()> {
    let options = run_options(matches)?;
    info!("qcreport v{}", env!("CARGO_PKG_VERSION"));

    let mut out = Term::stdout();
    let mut prompt = TerminalPrompt::new();
    let mut collab = Collaborators {
        out: &mut out,
        prompt: &mut prompt,
        renderer: &JsonChartRenderer,
    };

    let outcomes = run(&options, &mut collab)?;
    info!(modules = outcomes.len(), "all requested modules completed");
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_tracing(&matches);

    match run_report(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<QcReportError>() {
            Some(QcReportError::OverwriteDeclined { module }) => {
                let notice = Style::new().yellow();
                println!(
                    "{}",
                    notice.apply_to(format!("Aborted: output for {} left untouched.", module))
                );
                ExitCode::SUCCESS
            }
            _ => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}
