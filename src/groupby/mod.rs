use std::collections::HashMap;

use serde::Serialize;

use crate::error::Result;
use crate::stats::{descriptive, GroupSummary, GroupedStats};
use crate::table::{ColumnRole, Table};

/// Rows of a table partitioned by the label of one categorical column
///
/// Groups keep the order in which their label first appears. Rows whose
/// label is missing belong to no group.
#[derive(Debug)]
pub struct TableGroupBy<'a> {
    /// Source table
    source: &'a Table,

    /// Column used for grouping
    by: String,

    /// Group labels in order of first appearance
    keys: Vec<String>,

    /// Row indices per group, parallel to `keys`
    groups: Vec<Vec<usize>>,
}

/// Per-group means of several numeric columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMeans {
    pub group_column: String,
    pub columns: Vec<String>,
    /// `(label, means)` with means parallel to `columns`; `None` when the
    /// group has no present value in that column
    pub rows: Vec<(String, Vec<Option<f64>>)>,
}

impl GroupMeans {
    pub fn get(&self, key: &str, column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, means)| means[col])
    }
}

impl<'a> TableGroupBy<'a> {
    /// Partitions `source` by the categorical column `by`
    pub fn new(source: &'a Table, by: &str) -> Result<Self> {
        let labels = source.text_values(by)?;

        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut keys = Vec::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut skipped = 0;

        for (row, label) in labels.into_iter().enumerate() {
            let Some(label) = label else {
                skipped += 1;
                continue;
            };
            let pos = *positions.entry(label).or_insert_with(|| {
                keys.push(label.to_string());
                groups.push(Vec::new());
                keys.len() - 1
            });
            groups[pos].push(row);
        }

        if skipped > 0 {
            log::debug!("group by '{}': {} row(s) without a label skipped", by, skipped);
        }

        Ok(TableGroupBy {
            source,
            by: by.to_string(),
            keys,
            groups,
        })
    }

    /// Name of the grouping column
    pub fn by(&self) -> &str {
        &self.by
    }

    pub fn group_count(&self) -> usize {
        self.keys.len()
    }

    /// Labels in order of first appearance
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Row count of each group
    pub fn size(&self) -> Vec<(String, usize)> {
        self.iter()
            .map(|(k, rows)| (k.to_string(), rows.len()))
            .collect()
    }

    /// Row indices of one group
    pub fn indices(&self, key: &str) -> Option<&[usize]> {
        self.keys
            .iter()
            .position(|k| k == key)
            .map(|i| self.groups[i].as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.keys
            .iter()
            .map(|k| k.as_str())
            .zip(self.groups.iter().map(|g| g.as_slice()))
    }

    /// Rows of one group as a standalone table
    pub fn get_group(&self, key: &str) -> Option<Table> {
        self.indices(key).map(|rows| self.source.select_rows(rows))
    }

    /// Summary statistics of a numeric column per group
    pub fn summarize(&self, column: &str) -> Result<GroupedStats> {
        self.source.expect_role(column, ColumnRole::Numeric)?;

        let mut groups = Vec::with_capacity(self.keys.len());
        for (key, rows) in self.iter() {
            let values = self.source.numeric_values_at(column, rows)?;
            let stats = descriptive::describe_impl(column, &values)?;
            groups.push(GroupSummary {
                key: key.to_string(),
                stats,
            });
        }

        Ok(GroupedStats {
            column: column.to_string(),
            group_column: self.by.clone(),
            groups,
        })
    }

    /// Mean of each numeric column per group
    pub fn mean(&self, columns: &[&str]) -> Result<GroupMeans> {
        for column in columns {
            self.source.expect_role(column, ColumnRole::Numeric)?;
        }

        let mut rows = Vec::with_capacity(self.keys.len());
        for (key, indices) in self.iter() {
            let mut means = Vec::with_capacity(columns.len());
            for column in columns {
                let values = self.source.numeric_values_at(column, indices)?;
                means.push((!values.is_empty()).then(|| descriptive::mean(&values)));
            }
            rows.push((key.to_string(), means));
        }

        Ok(GroupMeans {
            group_column: self.by.clone(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }
}
