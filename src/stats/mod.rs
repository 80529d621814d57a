//! Descriptive statistics engine
//!
//! Pure functions over an immutable [`Table`]: per-column summaries, grouped
//! summaries and pairwise Pearson correlation. Nothing here performs I/O or
//! formatting, and nothing is cached between calls.
//!
//! Missing cells are skipped. Correlation uses the rows where both columns
//! are present.

pub mod descriptive;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::groupby::{GroupMeans, TableGroupBy};
use crate::table::{ColumnRole, Table};

/// Summary statistics of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Number of present values
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation, `None` below two values
    pub std: Option<f64>,
    pub min: f64,
    /// 25th percentile
    pub q1: f64,
    pub median: f64,
    /// 75th percentile
    pub q3: f64,
    pub max: f64,
}

/// Summaries of one column per group, in order of first appearance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedStats {
    pub column: String,
    pub group_column: String,
    pub groups: Vec<GroupSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: String,
    pub stats: SummaryStats,
}

impl GroupedStats {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&SummaryStats> {
        self.groups.iter().find(|g| g.key == key).map(|g| &g.stats)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.key.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SummaryStats)> {
        self.groups.iter().map(|g| (g.key.as_str(), &g.stats))
    }
}

/// Symmetric matrix of Pearson coefficients with a unit diagonal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient for a pair of column names, in either order
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Row-major matrix, rows and columns in [`columns`](Self::columns) order
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Every unordered pair `(a, b, r)` with `a` before `b`
    pub fn pairs(&self) -> Vec<(&str, &str, f64)> {
        let mut pairs = Vec::new();
        for i in 0..self.columns.len() {
            for j in (i + 1)..self.columns.len() {
                pairs.push((
                    self.columns[i].as_str(),
                    self.columns[j].as_str(),
                    self.values[i][j],
                ));
            }
        }
        pairs
    }
}

/// Summarizes one numeric column.
///
/// # Example
///
/// ```
/// use tabstats::stats;
/// use tabstats::table::TableBuilder;
///
/// let table = TableBuilder::new()
///     .numeric("x", vec![1.0, 2.0, 3.0, 4.0, 5.0])
///     .build()
///     .unwrap();
/// let summary = stats::summarize(&table, "x").unwrap();
/// assert_eq!(summary.mean, 3.0);
/// assert_eq!(summary.median, 3.0);
/// ```
pub fn summarize(table: &Table, column: &str) -> Result<SummaryStats> {
    let values = table.numeric_values(column)?;
    log::debug!("summarize '{}' over {} values", column, values.len());
    descriptive::describe_impl(column, &values)
}

/// Summarizes every numeric column, in column order
pub fn summarize_all(table: &Table) -> Result<Vec<(String, SummaryStats)>> {
    table
        .numeric_columns()
        .into_iter()
        .map(|name| Ok((name.to_string(), summarize(table, name)?)))
        .collect()
}

/// Summarizes `column` separately for each value of `group_column`.
///
/// Groups come back in the order their label first appears in the table.
pub fn summarize_by_group(table: &Table, column: &str, group_column: &str) -> Result<GroupedStats> {
    table.column_index(column)?;
    table.column_index(group_column)?;
    table.expect_role(column, ColumnRole::Numeric)?;

    TableGroupBy::new(table, group_column)?.summarize(column)
}

/// Per-group means of several numeric columns
pub fn group_means(table: &Table, group_column: &str, columns: &[&str]) -> Result<GroupMeans> {
    TableGroupBy::new(table, group_column)?.mean(columns)
}

/// Sample Pearson correlation between two numeric columns.
///
/// A column correlated with itself is exactly 1.0. A constant column gives
/// exactly 0.0 against anything else.
pub fn correlate(table: &Table, column_a: &str, column_b: &str) -> Result<f64> {
    let (x, y) = table.numeric_pairs(column_a, column_b)?;

    if column_a == column_b {
        return Ok(1.0);
    }

    if x.is_empty() {
        return Err(Error::InsufficientData {
            column: format!("{} vs {}", column_a, column_b),
            required: 1,
            actual: 0,
        });
    }

    descriptive::pearson_impl(&x, &y)
}

/// Correlation of every pair of the given numeric columns
pub fn correlation_matrix(table: &Table, columns: &[&str]) -> Result<CorrelationMatrix> {
    for (i, name) in columns.iter().enumerate() {
        table.expect_role(name, ColumnRole::Numeric)?;
        if columns[..i].contains(name) {
            return Err(Error::DuplicateColumnName(name.to_string()));
        }
    }

    let n = columns.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = correlate(table, columns[i], columns[j])?;
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        values,
    })
}

/// Pearson correlation of two equal-length slices, always through the formula
///
/// ```
/// let x = [1.0, 2.0, 4.0, 8.0];
/// let r = tabstats::stats::pearson(&x, &x).unwrap();
/// assert!((r - 1.0).abs() < 1e-9);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    descriptive::pearson_impl(x, y)
}

/// Sample covariance between two numeric columns
pub fn covariance(table: &Table, column_a: &str, column_b: &str) -> Result<f64> {
    let (x, y) = table.numeric_pairs(column_a, column_b)?;
    descriptive::covariance_impl(&x, &y)
}

/// Frequencies of a categorical column.
///
/// Sorted by descending count; equal counts keep first-appearance order.
/// Missing cells are not counted.
pub fn value_counts(table: &Table, column: &str) -> Result<Vec<(String, usize)>> {
    Ok(tally(table.text_values(column)?.into_iter().flatten()))
}

/// Label frequencies, descending; the sort is stable so ties stay in
/// first-appearance order
pub(crate) fn tally<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|(k, _)| k == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Most frequent label of a categorical column, first-encountered on ties
pub fn mode(table: &Table, column: &str) -> Result<String> {
    value_counts(table, column)?
        .into_iter()
        .next()
        .map(|(label, _)| label)
        .ok_or_else(|| Error::InsufficientData {
            column: column.to_string(),
            required: 1,
            actual: 0,
        })
}
