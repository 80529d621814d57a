//! Immutable row-oriented table
//!
//! A [`Table`] is an ordered list of uniquely named columns, each with a fixed
//! [`ColumnRole`], and an ordered list of rows whose cells line up with the
//! columns positionally. Roles are assigned once when the table is built and
//! are never inferred from content afterwards.
//!
//! # Example
//!
//! ```
//! use tabstats::table::{ColumnRole, TableBuilder};
//!
//! let table = TableBuilder::new()
//!     .numeric("petal_length", vec![1.4, 4.7, 6.0])
//!     .categorical("species", vec!["setosa", "versicolor", "virginica"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(table.row_count(), 3);
//! assert_eq!(table.role("species").unwrap(), ColumnRole::Categorical);
//! ```

mod value;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

pub use value::Value;

/// Static role of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    /// Holds `Number` or `Missing` cells
    Numeric,
    /// Holds `Text` or `Missing` cells
    Categorical,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Numeric => write!(f, "numeric"),
            ColumnRole::Categorical => write!(f, "categorical"),
        }
    }
}

/// Name and role of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    pub role: ColumnRole,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, role: ColumnRole) -> Self {
        ColumnSpec {
            name: name.into(),
            role,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, ColumnRole::Numeric)
    }

    pub fn categorical(name: impl Into<String>) -> Self {
        Self::new(name, ColumnRole::Categorical)
    }
}

/// Immutable in-memory table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<ColumnSpec>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Builds a table from a schema and rows.
    ///
    /// Fails when a column name repeats, when a row does not have exactly one
    /// cell per column, or when a cell does not fit its column's role.
    /// Row numbers in errors are zero-based.
    pub fn new(columns: Vec<ColumnSpec>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let index = build_index(&columns)?;

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::InconsistentRowLength {
                    row: row_idx,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            for (spec, cell) in columns.iter().zip(row) {
                check_cell(spec, cell, row_idx)?;
            }
        }

        Ok(Table {
            columns,
            index,
            rows,
        })
    }

    /// Table with the same schema and a new set of already validated rows
    pub(crate) fn with_rows(&self, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == self.columns.len()));
        Table {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows,
        }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of a column, or `UnknownColumn`
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    pub fn role(&self, name: &str) -> Result<ColumnRole> {
        Ok(self.columns[self.column_index(name)?].role)
    }

    /// Position of a column that must have the given role
    pub fn expect_role(&self, name: &str, role: ColumnRole) -> Result<usize> {
        let idx = self.column_index(name)?;
        let found = self.columns[idx].role;
        if found != role {
            return Err(Error::ColumnRoleMismatch {
                column: name.to_string(),
                expected: role,
                found,
            });
        }
        Ok(idx)
    }

    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns_with_role(ColumnRole::Numeric)
    }

    pub fn categorical_columns(&self) -> Vec<&str> {
        self.columns_with_role(ColumnRole::Categorical)
    }

    fn columns_with_role(&self, role: ColumnRole) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.role == role)
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&[Value]> {
        self.rows.get(idx).map(|r| r.as_slice())
    }

    /// Iterator over one column's cells in row order
    pub fn column_values(&self, name: &str) -> Result<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Present values of a numeric column, in row order
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self.expect_role(name, ColumnRole::Numeric)?;
        Ok(self.rows.iter().filter_map(|row| row[idx].as_f64()).collect())
    }

    /// Present values of a numeric column restricted to the given rows
    pub fn numeric_values_at(&self, name: &str, rows: &[usize]) -> Result<Vec<f64>> {
        let idx = self.expect_role(name, ColumnRole::Numeric)?;
        Ok(rows
            .iter()
            .filter_map(|&r| self.rows.get(r).and_then(|row| row[idx].as_f64()))
            .collect())
    }

    /// Paired values of two numeric columns at rows where both are present
    pub fn numeric_pairs(&self, a: &str, b: &str) -> Result<(Vec<f64>, Vec<f64>)> {
        let ia = self.expect_role(a, ColumnRole::Numeric)?;
        let ib = self.expect_role(b, ColumnRole::Numeric)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| Some((row[ia].as_f64()?, row[ib].as_f64()?)))
            .unzip())
    }

    /// Labels of a categorical column, `None` where missing
    pub fn text_values(&self, name: &str) -> Result<Vec<Option<&str>>> {
        let idx = self.expect_role(name, ColumnRole::Categorical)?;
        Ok(self.rows.iter().map(|row| row[idx].as_text()).collect())
    }

    /// New table holding the given rows, in the given order
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        self.with_rows(rows)
    }

    /// New table holding the first `n` rows
    pub fn head(&self, n: usize) -> Self {
        self.with_rows(self.rows.iter().take(n).cloned().collect())
    }
}

fn build_index(columns: &[ColumnSpec]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(columns.len());
    for (i, spec) in columns.iter().enumerate() {
        if index.insert(spec.name.clone(), i).is_some() {
            return Err(Error::DuplicateColumnName(spec.name.clone()));
        }
    }
    Ok(index)
}

fn check_cell(spec: &ColumnSpec, cell: &Value, row: usize) -> Result<()> {
    let ok = matches!(
        (spec.role, cell),
        (_, Value::Missing)
            | (ColumnRole::Numeric, Value::Number(_))
            | (ColumnRole::Categorical, Value::Text(_))
    );
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidCell {
            column: spec.name.clone(),
            row,
            message: format!("{:?} does not fit a {} column", cell, spec.role),
        })
    }
}

/// Column-oriented builder for [`Table`]
#[derive(Debug, Default)]
pub struct TableBuilder {
    columns: Vec<(ColumnSpec, Vec<Value>)>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fully populated numeric column
    pub fn numeric<I>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.column(
            ColumnSpec::numeric(name),
            values.into_iter().map(Value::Number).collect(),
        )
    }

    /// Adds a numeric column where `None` marks a missing cell
    pub fn numeric_opt<I>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        self.column(
            ColumnSpec::numeric(name),
            values.into_iter().map(Value::from).collect(),
        )
    }

    /// Adds a fully populated categorical column
    pub fn categorical<I, S>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column(
            ColumnSpec::categorical(name),
            values.into_iter().map(|s| Value::Text(s.into())).collect(),
        )
    }

    /// Adds a categorical column where `None` marks a missing cell
    pub fn categorical_opt<I, S>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.column(
            ColumnSpec::categorical(name),
            values
                .into_iter()
                .map(|s| s.map_or(Value::Missing, |s| Value::Text(s.into())))
                .collect(),
        )
    }

    fn column(mut self, spec: ColumnSpec, values: Vec<Value>) -> Self {
        self.columns.push((spec, values));
        self
    }

    /// Transposes the columns into rows and validates the result.
    ///
    /// All columns must have the same length.
    pub fn build(self) -> Result<Table> {
        let row_count = self.columns.first().map_or(0, |(_, v)| v.len());
        for (_, values) in &self.columns {
            if values.len() != row_count {
                return Err(Error::DimensionMismatch {
                    expected: row_count,
                    actual: values.len(),
                });
            }
        }

        let mut specs = Vec::with_capacity(self.columns.len());
        let mut iters = Vec::with_capacity(self.columns.len());
        for (spec, values) in self.columns {
            specs.push(spec);
            iters.push(values.into_iter());
        }

        let rows = (0..row_count)
            .map(|_| {
                iters
                    .iter_mut()
                    .map(|it| it.next().unwrap_or(Value::Missing))
                    .collect()
            })
            .collect();

        Table::new(specs, rows)
    }
}
