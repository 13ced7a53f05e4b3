//! End-to-end runs against a complete FastQC report.

use std::fs;
use std::path::{Path, PathBuf};

use qcreportlib::output::{CHART_FILE, CLASSIFICATION_FILE, REPORT_FILE};
use qcreportlib::{
    run, Classification, Collaborators, FixedAnswer, JsonChartRenderer, ModuleId, ModuleOutcome,
    QcReportError, Report, RunOptions, Stage, Value, REGISTRY,
};
use tempfile::{tempdir, TempDir};

const FIXTURE: &str = include_str!("fixtures/fastqc_data.txt");

fn write_input(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("fastqc_data.txt");
    fs::write(&path, text).unwrap();
    path
}

fn run_with(options: &RunOptions, answer: bool) -> (qcreportlib::Result<Vec<ModuleOutcome>>, String) {
    let mut out = Vec::new();
    let mut prompt = FixedAnswer(answer);
    let mut collab = Collaborators {
        out: &mut out,
        prompt: &mut prompt,
        renderer: &JsonChartRenderer,
    };
    let result = run(options, &mut collab);
    (result, String::from_utf8(out).unwrap())
}

fn outcome(outcomes: &[ModuleOutcome], id: ModuleId) -> &ModuleOutcome {
    outcomes.iter().find(|o| o.id == id).unwrap()
}

fn module_dir(root: &Path, id: ModuleId) -> PathBuf {
    root.join(id.name().replace(' ', "_"))
}

fn snapshot(root: &Path) -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    for d in REGISTRY.iter() {
        let dir = module_dir(root, d.id);
        for name in [REPORT_FILE, CLASSIFICATION_FILE, CHART_FILE] {
            let path = dir.join(name);
            if path.exists() {
                let text = fs::read_to_string(&path).unwrap();
                files.push((path, text));
            }
        }
    }
    files
}

#[test]
fn test_run_all_produces_every_module() {
    let input_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let input = write_input(&input_dir, FIXTURE);

    let (result, out) = run_with(&RunOptions::new(&input, out_dir.path()).all(), true);
    let outcomes = result.unwrap();

    assert_eq!(outcomes.len(), REGISTRY.len());
    assert!(outcomes.iter().all(|o| o.stage == Stage::Completed));
    assert_eq!(out.lines().last(), Some("All module reports have been created."));
    assert!(out.contains("Generating reports and graphs for all remaining analysis..."));

    for d in REGISTRY.iter().filter(|d| d.artifacts) {
        let dir = module_dir(out_dir.path(), d.id);
        assert!(dir.join(REPORT_FILE).is_file(), "{} report", d.name);
        assert!(dir.join(CLASSIFICATION_FILE).is_file(), "{} filter", d.name);
        assert_eq!(dir.join(CHART_FILE).is_file(), d.has_table(), "{} graph", d.name);
    }
    assert!(!module_dir(out_dir.path(), ModuleId::BasicStatistics).exists());
}

#[test]
fn test_classifications_written() {
    let input_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let input = write_input(&input_dir, FIXTURE);

    let (result, _) = run_with(&RunOptions::new(&input, out_dir.path()).all(), true);
    let outcomes = result.unwrap();

    let tile = outcome(&outcomes, ModuleId::PerTileSeqQuality);
    assert_eq!(tile.classification, Some(Classification::Warn));
    let kmer = outcome(&outcomes, ModuleId::KmerContent);
    assert_eq!(kmer.classification, Some(Classification::Fail));
    assert_eq!(
        fs::read_to_string(module_dir(out_dir.path(), ModuleId::KmerContent).join(CLASSIFICATION_FILE))
            .unwrap(),
        "fail\n"
    );

    let basic = Report::from_text(FIXTURE).section("Basic Statistics").unwrap();
    assert_eq!(basic.classification().unwrap(), Classification::Pass);
    assert_eq!(outcome(&outcomes, ModuleId::BasicStatistics).classification, None);
}

#[test]
fn test_report_file_is_section_verbatim() {
    let input_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let input = write_input(&input_dir, FIXTURE);

    let options = RunOptions::new(&input, out_dir.path()).module(ModuleId::AdapterContent);
    run_with(&options, true).0.unwrap();

    let written =
        fs::read_to_string(module_dir(out_dir.path(), ModuleId::AdapterContent).join(REPORT_FILE))
            .unwrap();
    let start = FIXTURE.find(">>Adapter Content").unwrap();
    let end = start + FIXTURE[start..].find(">>END_MODULE").unwrap();
    assert_eq!(written, &FIXTURE[start..end]);
}

#[test]
fn test_rerun_with_confirmation_is_idempotent() {
    let input_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let input = write_input(&input_dir, FIXTURE);
    let options = RunOptions::new(&input, out_dir.path()).all();

    run_with(&options, true).0.unwrap();
    let first = snapshot(out_dir.path());
    run_with(&options, true).0.unwrap();
    let second = snapshot(out_dir.path());

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_rerun_declined_aborts_whole_run() {
    let input_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let input = write_input(&input_dir, FIXTURE);
    let options = RunOptions::new(&input, out_dir.path()).all();

    run_with(&options, true).0.unwrap();
    let before = snapshot(out_dir.path());

    let (result, out) = run_with(&options, false);
    match result {
        Err(QcReportError::OverwriteDeclined { module }) => {
            assert_eq!(module, "Per base sequence quality")
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!out.contains("Generating output for Per tile sequence quality..."));
    assert_eq!(before, snapshot(out_dir.path()));
}

#[test]
fn test_missing_section_stops_before_any_output() {
    let input_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let start = FIXTURE.find(">>Per base sequence quality").unwrap();
    let end = FIXTURE.find(">>Per tile sequence quality").unwrap();
    let text = format!("{}{}", &FIXTURE[..start], &FIXTURE[end..]);
    let input = write_input(&input_dir, &text);

    let options = RunOptions::new(&input, out_dir.path()).module(ModuleId::PerBaseSeqQuality);
    let (result, out) = run_with(&options, true);

    match result {
        Err(QcReportError::MissingSection { module }) => {
            assert_eq!(module, "Per base sequence quality")
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!out.contains("Generating output for Per base sequence quality..."));
    assert!(!module_dir(out_dir.path(), ModuleId::PerBaseSeqQuality).exists());
}

#[test]
fn test_grouped_base_ranges_are_rejected() {
    let input_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let text = FIXTURE.replacen(
        "2\t32.4\t33.0\t31.0\t34.0\t29.0\t34.0\n",
        "2-3\t32.4\t33.0\t31.0\t34.0\t29.0\t34.0\n",
        1,
    );
    let input = write_input(&input_dir, &text);

    let options = RunOptions::new(&input, out_dir.path()).module(ModuleId::PerBaseSeqQuality);
    match run_with(&options, true).0 {
        Err(QcReportError::Format { module, line, message }) => {
            assert_eq!(module, "Per base sequence quality");
            assert_eq!(line, 4);
            assert!(message.contains("'2-3'"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_kmer_table_keeps_top_six_by_position() {
    let input_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let input = write_input(&input_dir, FIXTURE);

    let options = RunOptions::new(&input, out_dir.path()).module(ModuleId::KmerContent);
    let outcomes = run_with(&options, true).0.unwrap();
    let data = outcome(&outcomes, ModuleId::KmerContent).table.as_ref().unwrap();
    let table = data.as_flat().unwrap();

    let sequences: Vec<String> = table
        .column("Sequence")
        .unwrap()
        .iter()
        .map(|v| v.to_string())
        .collect();
    assert_eq!(
        sequences,
        vec!["GGGGG", "CCCCC", "GATCA", "AAAAA", "CGATC", "TTTTT"]
    );
    assert_eq!(table.index_name(), Some("Max Obs/Exp Position"));
}

#[test]
fn test_tile_table_is_pivoted() {
    let input_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let input = write_input(&input_dir, FIXTURE);

    let options = RunOptions::new(&input, out_dir.path()).module(ModuleId::PerTileSeqQuality);
    let outcomes = run_with(&options, true).0.unwrap();
    let data = outcome(&outcomes, ModuleId::PerTileSeqQuality).table.as_ref().unwrap();
    let pivot = data.as_pivot().unwrap();

    assert_eq!(pivot.rows, vec![Value::Int(1102), Value::Int(1101)]);
    assert_eq!(pivot.columns, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    assert_eq!(pivot.cells[0], vec![Some(-0.22), Some(0.08), Some(-1.4)]);
}

#[test]
fn test_duplication_summary_reaches_chart() {
    let input_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let input = write_input(&input_dir, FIXTURE);

    let options = RunOptions::new(&input, out_dir.path()).module(ModuleId::SeqDuplicationLevels);
    let outcomes = run_with(&options, true).0.unwrap();
    let data = outcome(&outcomes, ModuleId::SeqDuplicationLevels)
        .table
        .as_ref()
        .unwrap();
    let table = data.as_flat().unwrap();

    assert_eq!(
        table.summary,
        vec![
            Value::Text("Total Deduplicated Percentage".to_string()),
            Value::Float(72.35)
        ]
    );
    assert_eq!(table.len(), 10);

    let chart: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(
            module_dir(out_dir.path(), ModuleId::SeqDuplicationLevels).join(CHART_FILE),
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(chart["title"], "Percent of seqs remaining if deduplicated 72.35%");
    assert_eq!(chart["series"].as_array().unwrap().len(), 2);
}

#[test]
fn test_quality_chart_title_carries_encoding() {
    let input_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let input = write_input(&input_dir, FIXTURE);

    let options = RunOptions::new(&input, out_dir.path()).module(ModuleId::PerBaseSeqQuality);
    run_with(&options, true).0.unwrap();

    let chart: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(
            module_dir(out_dir.path(), ModuleId::PerBaseSeqQuality).join(CHART_FILE),
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(
        chart["title"],
        "Quality scores across all bases (Sanger / Illumina 1.9 encoding)"
    );
    assert_eq!(chart["kind"], "box_plot");
    assert_eq!(chart["boxes"].as_array().unwrap().len(), 12);
}
