//! Shaping transforms applied to a typed table after casting.
//!
//! Modules declare an ordered list of [`Transform`]s. They run left to right
//! over a [`TableData`]; a pivot turns the flat table into a wide one, after
//! which only row ordering makes sense.

use std::cmp::Ordering as Cmp;

use tracing::debug;

use crate::data::record::{Record, Value};
use crate::data::table::{PivotTable, TableData, TypedTable};
use crate::error::QcReportError;
use crate::Result;

use super::options::Ordering;

/// One post-casting step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Designate the key column.
    IndexBy(&'static str),
    /// Stable sort of records by a column.
    SortBy(Ordering),
    /// Keep the `k` records ranking highest in `by`, then restore key order
    /// (or input order if no key column is set).
    TopK { by: &'static str, k: usize },
    /// Reshape long to wide: one row per distinct `rows.by` value, one column
    /// per distinct `columns` value, cells filled from `values`.
    Pivot {
        rows: Ordering,
        columns: &'static str,
        values: &'static str,
    },
}

impl Transform {
    /// Apply this transform to `data`.
    pub fn apply(self, data: TableData) -> Result<TableData> {
        match (self, data) {
            (Transform::IndexBy(column), TableData::Flat(mut table)) => {
                table.index = Some(table.column_index(column)?);
                Ok(TableData::Flat(table))
            }
            (Transform::SortBy(ordering), TableData::Flat(table)) => {
                Ok(TableData::Flat(sort_by(table, ordering)?))
            }
            (Transform::TopK { by, k }, TableData::Flat(table)) => {
                Ok(TableData::Flat(top_k(table, by, k)?))
            }
            (Transform::Pivot { rows, columns, values }, TableData::Flat(table)) => {
                Ok(TableData::Pivot(pivot(table, rows, columns, values)?))
            }
            (Transform::SortBy(ordering), TableData::Pivot(mut table))
                if ordering.by == table.row_key =>
            {
                sort_pivot_rows(&mut table, ordering);
                Ok(TableData::Pivot(table))
            }
            (transform, TableData::Pivot(table)) => Err(QcReportError::table_shape(
                &table.module,
                format!("{:?} cannot be applied to a pivoted table", transform),
            )),
        }
    }
}

/// Run `transforms` in order over a freshly built table.
pub fn shape(table: TypedTable, transforms: &[Transform]) -> Result<TableData> {
    let module = table.module.clone();
    let data = transforms
        .iter()
        .try_fold(TableData::Flat(table), |data, t| t.apply(data))?;
    debug!(module = %module, steps = transforms.len(), "table shaped");
    Ok(data)
}

fn sort_by(mut table: TypedTable, ordering: Ordering) -> Result<TypedTable> {
    let column = table.column_index(ordering.by)?;
    table
        .records
        .sort_by(|a, b| ordering.direction.apply(a.values()[column].total_cmp(&b.values()[column])));
    Ok(table)
}

fn top_k(mut table: TypedTable, by: &str, k: usize) -> Result<TypedTable> {
    let rank = table.column_index(by)?;
    let records = &table.records;

    // Stable descending sort keeps input order among equal ranks.
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| records[b].values()[rank].total_cmp(&records[a].values()[rank]));
    order.truncate(k);

    match table.index {
        Some(key) => order.sort_by(|&a, &b| {
            records[a].values()[key]
                .total_cmp(&records[b].values()[key])
                .then(a.cmp(&b))
        }),
        None => order.sort_unstable(),
    }

    let mut slots: Vec<Option<Record>> = table.records.drain(..).map(Some).collect();
    table.records = order.into_iter().filter_map(|i| slots[i].take()).collect();
    Ok(table)
}

fn distinct_sorted(values: impl Iterator<Item = Value>) -> Vec<Value> {
    let mut keys: Vec<Value> = values.collect();
    keys.sort_by(|a, b| a.total_cmp(b));
    keys.dedup_by(|a, b| a.total_cmp(b) == Cmp::Equal);
    keys
}

fn position(keys: &[Value], value: &Value) -> Option<usize> {
    keys.iter().position(|k| k.total_cmp(value) == Cmp::Equal)
}

fn pivot(table: TypedTable, rows: Ordering, columns: &str, values: &str) -> Result<PivotTable> {
    let r = table.column_index(rows.by)?;
    let c = table.column_index(columns)?;
    let v = table.column_index(values)?;

    let mut row_keys = distinct_sorted(table.records.iter().map(|rec| rec.values()[r].clone()));
    row_keys.sort_by(|a, b| rows.direction.apply(a.total_cmp(b)));
    let column_keys = distinct_sorted(table.records.iter().map(|rec| rec.values()[c].clone()));

    let mut cells = vec![vec![None; column_keys.len()]; row_keys.len()];
    for (offset, record) in table.records.iter().enumerate() {
        let line = table.header_line + offset + 1;
        let value = record.values()[v].as_f64().ok_or_else(|| {
            QcReportError::format(&table.module, line, format!("column '{}' is not numeric", values))
        })?;
        // Both keys were collected from these same records.
        let (Some(ri), Some(ci)) = (
            position(&row_keys, &record.values()[r]),
            position(&column_keys, &record.values()[c]),
        ) else {
            continue;
        };

        let cell = &mut cells[ri][ci];
        if cell.is_some() {
            return Err(QcReportError::format(
                &table.module,
                line,
                format!(
                    "duplicate entry for {}={} and {}={}",
                    rows.by,
                    record.values()[r],
                    columns,
                    record.values()[c]
                ),
            ));
        }
        *cell = Some(value);
    }

    Ok(PivotTable {
        module: table.module,
        row_key: rows.by.to_string(),
        column_key: columns.to_string(),
        value_key: values.to_string(),
        rows: row_keys,
        columns: column_keys,
        cells,
    })
}

fn sort_pivot_rows(table: &mut PivotTable, ordering: Ordering) {
    let mut paired: Vec<(Value, Vec<Option<f64>>)> =
        table.rows.drain(..).zip(table.cells.drain(..)).collect();
    paired.sort_by(|a, b| ordering.direction.apply(a.0.total_cmp(&b.0)));
    (table.rows, table.cells) = paired.into_iter().unzip();
}
