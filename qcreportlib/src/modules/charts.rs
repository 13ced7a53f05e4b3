//! Chart builders for each tabular module.

use crate::data::record::Value;
use crate::data::table::{TableData, TypedTable};
use crate::error::QcReportError;
use crate::output::chart::{BoxStats, Chart, ChartKind, Heatmap, Series};
use crate::source::Report;
use crate::Result;

const POSITION_IN_READ: &str = "Position in read (bp)";

fn flat(data: &TableData) -> Result<&TypedTable> {
    data.as_flat()
        .ok_or_else(|| QcReportError::table_shape(data.module(), "expected a flat table"))
}

/// Cloned values of the key column (or the first column if none is set).
fn keys(table: &TypedTable) -> Vec<Value> {
    let column = table.index.unwrap_or(0);
    table
        .records
        .iter()
        .filter_map(|r| r.get(column).cloned())
        .collect()
}

fn series(table: &TypedTable, label: &str, column: &str) -> Result<Series> {
    Ok(Series::new(label, keys(table), table.floats(column)?))
}

pub(crate) fn per_base_quality(data: &TableData, report: &Report) -> Result<Chart> {
    let table = flat(data)?;
    let median = table.floats("Median")?;
    let q1 = table.floats("Lower Quartile")?;
    let q3 = table.floats("Upper Quartile")?;
    let low = table.floats("10th Percentile")?;
    let high = table.floats("90th Percentile")?;

    let boxes = keys(table)
        .into_iter()
        .enumerate()
        .map(|(i, label)| BoxStats {
            label,
            median: median[i],
            q1: q1[i],
            q3: q3[i],
            whisker_low: low[i],
            whisker_high: high[i],
        })
        .collect();

    Ok(Chart::new(
        ChartKind::BoxPlot,
        format!(
            "Quality scores across all bases ({} encoding)",
            report.encoding().unwrap_or_default()
        ),
    )
    .axes(POSITION_IN_READ, "Quality score (Phred)")
    .boxes(boxes)
    .series(series(table, "Mean", "Mean")?))
}

pub(crate) fn per_tile_quality(data: &TableData, _report: &Report) -> Result<Chart> {
    let pivot = data.as_pivot().ok_or_else(|| {
        QcReportError::table_shape(data.module(), "expected a pivoted table")
    })?;
    Ok(Chart::new(ChartKind::Heatmap, "Quality per tile")
        .axes(POSITION_IN_READ, "Tile")
        .heatmap(Heatmap {
            rows: pivot.rows.clone(),
            columns: pivot.columns.clone(),
            cells: pivot.cells.clone(),
        }))
}

pub(crate) fn per_sequence_quality(data: &TableData, _report: &Report) -> Result<Chart> {
    let table = flat(data)?;
    Ok(
        Chart::new(ChartKind::Line, "Quality score distribution over all sequences")
            .axes("Quality Score", "Count")
            .series(series(table, "Count", "Count")?),
    )
}

pub(crate) fn per_base_content(data: &TableData, _report: &Report) -> Result<Chart> {
    let table = flat(data)?;
    let mut chart = Chart::new(ChartKind::Line, "Sequence content across all bases")
        .axes(POSITION_IN_READ, "Proportion (%)");
    for base in ["G", "A", "T", "C"] {
        chart = chart.series(series(table, &format!("% {}", base), base)?);
    }
    Ok(chart)
}

pub(crate) fn gc_content(data: &TableData, _report: &Report) -> Result<Chart> {
    let table = flat(data)?;
    Ok(Chart::new(ChartKind::Line, "GC distribution over all sequences")
        .axes("Mean GC content (%)", "Count")
        .series(series(table, "GC count per read", "Count")?))
}

pub(crate) fn n_content(data: &TableData, _report: &Report) -> Result<Chart> {
    let table = flat(data)?;
    let percent = table
        .floats("N-Count")?
        .into_iter()
        .map(|v| v * 100.0)
        .collect();
    Ok(Chart::new(ChartKind::Line, "N content across all bases")
        .axes(POSITION_IN_READ, "Percentage of base calls (%)")
        .series(Series::new("%N", keys(table), percent)))
}

pub(crate) fn length_distribution(data: &TableData, _report: &Report) -> Result<Chart> {
    let table = flat(data)?;
    let kind = if table.len() <= 1 {
        ChartKind::Bar
    } else {
        ChartKind::Line
    };
    Ok(
        Chart::new(kind, "Distribution of sequence lengths over all sequences")
            .axes("Sequence Length (bp)", "Count")
            .series(series(table, "Count", "Count")?),
    )
}

pub(crate) fn duplication_levels(data: &TableData, _report: &Report) -> Result<Chart> {
    let table = flat(data)?;
    let remaining = table.summary.get(1).and_then(Value::as_f64).ok_or_else(|| {
        QcReportError::format(&table.module, 2, "missing total deduplicated percentage")
    })?;

    Ok(Chart::new(
        ChartKind::Line,
        format!("Percent of seqs remaining if deduplicated {:.2}%", remaining),
    )
    .axes("Sequence Duplication Level", "Total Library (%)")
    .series(series(
        table,
        "% Deduplicated sequences",
        "Percentage of deduplicated",
    )?)
    .series(series(table, "% Total sequences", "Percentage of total")?))
}

pub(crate) fn adapter_content(data: &TableData, _report: &Report) -> Result<Chart> {
    let table = flat(data)?;
    let key = table.index.unwrap_or(0);
    let mut chart = Chart::new(ChartKind::Line, "% Adapter")
        .axes(POSITION_IN_READ, "Cumulative proportion of library (%)");

    for (i, adapter) in table.columns.iter().enumerate() {
        if i == key {
            continue;
        }
        let cumulative = table
            .floats(adapter)?
            .into_iter()
            .scan(0.0, |acc, v| {
                *acc += v;
                Some(*acc)
            })
            .collect();
        chart = chart.series(Series::new(adapter.as_str(), keys(table), cumulative));
    }
    Ok(chart)
}

pub(crate) fn kmer_content(data: &TableData, _report: &Report) -> Result<Chart> {
    let table = flat(data)?;
    let sequences = table.column("Sequence")?;
    let enrichment = table.floats("Obs/Exp Max")?;
    let positions = keys(table);

    // Series per sequence, in first-seen order.
    let mut groups: Vec<Series> = Vec::new();
    for ((seq, x), y) in sequences.iter().zip(positions).zip(enrichment) {
        let label = seq.to_string();
        match groups.iter_mut().find(|s| s.label == label) {
            Some(group) => group.points.extend(Series::new("", vec![x], vec![y]).points),
            None => groups.push(Series::new(label, vec![x], vec![y])),
        }
    }

    // One point per sequence reads better as bars.
    let kind = if groups.len() == sequences.len() {
        ChartKind::Bar
    } else {
        ChartKind::Line
    };
    let mut chart =
        Chart::new(kind, "Relative enrichment over read length").axes(POSITION_IN_READ, "");
    for group in groups {
        chart = chart.series(group);
    }
    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::{Record, Value};

    fn table(columns: &[&str], rows: Vec<Vec<Value>>, index: usize) -> TableData {
        TableData::Flat(TypedTable {
            module: "test".to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            index: Some(index),
            records: rows.into_iter().map(Record::new).collect(),
            summary: Vec::new(),
            header_line: 2,
        })
    }

    fn report() -> Report {
        Report::from_text("Encoding\tSanger / Illumina 1.9\n")
    }

    #[test]
    fn test_n_content_scales_to_percent() {
        let data = table(
            &["Base", "N-Count"],
            vec![
                vec![Value::Int(1), Value::Float(0.0)],
                vec![Value::Int(2), Value::Float(0.25)],
            ],
            0,
        );
        let chart = n_content(&data, &report()).unwrap();
        assert_eq!(chart.series[0].points[1].y, 25.0);
        assert_eq!(chart.series[0].points[1].x, Value::Int(2));
    }

    #[test]
    fn test_adapter_content_is_cumulative() {
        let data = table(
            &["Position", "Illumina Universal Adapter", "Nextera Transposase Sequence"],
            vec![
                vec![Value::Int(1), Value::Float(0.5), Value::Float(0.0)],
                vec![Value::Int(2), Value::Float(1.0), Value::Float(0.25)],
                vec![Value::Int(3), Value::Float(1.5), Value::Float(0.25)],
            ],
            0,
        );
        let chart = adapter_content(&data, &report()).unwrap();
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].label, "Illumina Universal Adapter");
        let ys: Vec<f64> = chart.series[0].points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![0.5, 1.5, 3.0]);
    }

    #[test]
    fn test_per_base_quality_title_has_encoding() {
        let data = table(
            &[
                "Base",
                "Mean",
                "Median",
                "Lower Quartile",
                "Upper Quartile",
                "10th Percentile",
                "90th Percentile",
            ],
            vec![vec![
                Value::Int(1),
                Value::Float(32.1),
                Value::Float(33.0),
                Value::Float(31.0),
                Value::Float(34.0),
                Value::Float(28.0),
                Value::Float(34.0),
            ]],
            0,
        );
        let chart = per_base_quality(&data, &report()).unwrap();
        assert_eq!(
            chart.title,
            "Quality scores across all bases (Sanger / Illumina 1.9 encoding)"
        );
        assert_eq!(chart.kind, ChartKind::BoxPlot);
        assert_eq!(chart.boxes[0].q1, 31.0);
        assert_eq!(chart.boxes[0].whisker_high, 34.0);
        assert_eq!(chart.series[0].label, "Mean");
    }

    #[test]
    fn test_length_distribution_single_length_is_bar() {
        let data = table(
            &["Length", "Count"],
            vec![vec![Value::Text("150".into()), Value::Float(1000.0)]],
            0,
        );
        assert_eq!(length_distribution(&data, &report()).unwrap().kind, ChartKind::Bar);
    }

    #[test]
    fn test_kmer_content_groups_by_sequence() {
        let row = |seq: &str, pos: i64, y: f64| {
            vec![
                Value::Text(seq.into()),
                Value::Int(10),
                Value::Float(0.0),
                Value::Float(y),
                Value::Int(pos),
            ]
        };
        let columns = ["Sequence", "Count", "PValue", "Obs/Exp Max", "Max Obs/Exp Position"];

        let unique = table(&columns, vec![row("AAAAA", 1, 5.0), row("CCCCC", 2, 6.0)], 4);
        let chart = kmer_content(&unique, &report()).unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.series.len(), 2);

        let repeated = table(&columns, vec![row("AAAAA", 1, 5.0), row("AAAAA", 3, 6.0)], 4);
        let chart = kmer_content(&repeated, &report()).unwrap();
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].points.len(), 2);
    }

    #[test]
    fn test_missing_column_is_format_error() {
        let data = table(&["Base", "Count"], vec![], 0);
        assert!(matches!(
            n_content(&data, &report()).unwrap_err(),
            QcReportError::Format { .. }
        ));
    }

    #[test]
    fn test_chart_on_wrong_table_shape() {
        let data = table(&["Tile", "Base", "Mean"], vec![], 0);
        let err = per_tile_quality(&data, &report()).unwrap_err();
        assert!(matches!(err, QcReportError::TableShape { .. }));
        assert_eq!(
            err.to_string(),
            "module \"test\" table cannot be used here: expected a pivoted table"
        );
    }
}
