//! Missing-value handling
//!
//! [`impute`] is a pure transform: numeric gaps are filled with the column
//! mean, categorical gaps with the column mode. A mode tie goes to the label
//! encountered first in row order. A column with no present value at all has
//! nothing to fill from and is left as it is.

use std::fmt;

use serde::Serialize;

use crate::stats::{self, descriptive};
use crate::table::{ColumnRole, Table, Value};

/// Value used to fill one column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", content = "value", rename_all = "lowercase")]
pub enum FillValue {
    Mean(f64),
    Mode(String),
}

impl fmt::Display for FillValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillValue::Mean(v) => write!(f, "mean ({:.2})", v),
            FillValue::Mode(s) => write!(f, "mode ('{}')", s),
        }
    }
}

/// One filled column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFill {
    pub column: String,
    pub value: FillValue,
    /// Number of cells that were filled
    pub filled: usize,
}

/// What [`impute_with_report`] changed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImputeReport {
    pub fills: Vec<ColumnFill>,
    /// Columns that were entirely missing and stay that way
    pub unfilled: Vec<String>,
}

impl ImputeReport {
    pub fn filled_cells(&self) -> usize {
        self.fills.iter().map(|f| f.filled).sum()
    }
}

/// Missing cells per column, in column order
pub fn missing_counts(table: &Table) -> Vec<(String, usize)> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, spec)| {
            let n = table.rows().iter().filter(|r| r[idx].is_missing()).count();
            (spec.name.clone(), n)
        })
        .collect()
}

/// Total number of missing cells
pub fn total_missing(table: &Table) -> usize {
    missing_counts(table).iter().map(|(_, n)| n).sum()
}

/// Fills missing cells with column mean or mode
pub fn impute(table: &Table) -> Table {
    impute_with_report(table).0
}

/// Same as [`impute`], also describing every fill
pub fn impute_with_report(table: &Table) -> (Table, ImputeReport) {
    let mut rows = table.rows().to_vec();
    let mut report = ImputeReport::default();

    for (idx, spec) in table.columns().iter().enumerate() {
        let missing = rows.iter().filter(|r| r[idx].is_missing()).count();
        if missing == 0 {
            continue;
        }
        let Some(fill) = fill_value(&rows, idx, spec.role) else {
            log::warn!("column '{}' has no values; left unfilled", spec.name);
            report.unfilled.push(spec.name.clone());
            continue;
        };

        let cell = match &fill {
            FillValue::Mean(v) => Value::Number(*v),
            FillValue::Mode(s) => Value::Text(s.clone()),
        };
        for row in rows.iter_mut().filter(|r| r[idx].is_missing()) {
            row[idx] = cell.clone();
        }

        log::info!("column '{}': {} cell(s) filled with {}", spec.name, missing, fill);
        report.fills.push(ColumnFill {
            column: spec.name.clone(),
            value: fill,
            filled: missing,
        });
    }

    (table.with_rows(rows), report)
}

/// Mean or mode of the present cells in column `idx`, `None` if there are none
fn fill_value(rows: &[Vec<Value>], idx: usize, role: ColumnRole) -> Option<FillValue> {
    match role {
        ColumnRole::Numeric => {
            let values: Vec<f64> = rows.iter().filter_map(|r| r[idx].as_f64()).collect();
            (!values.is_empty()).then(|| FillValue::Mean(descriptive::mean(&values)))
        }
        ColumnRole::Categorical => stats::tally(rows.iter().filter_map(|r| r[idx].as_text()))
            .into_iter()
            .next()
            .map(|(label, _)| FillValue::Mode(label)),
    }
}

/// Keeps only rows without any missing cell
pub fn drop_missing_rows(table: &Table) -> Table {
    let rows = table
        .rows()
        .iter()
        .filter(|r| r.iter().all(|c| !c.is_missing()))
        .cloned()
        .collect();
    table.with_rows(rows)
}
