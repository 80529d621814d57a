//! Console and JSON analysis report
//!
//! [`AnalysisReport::build`] runs the statistics over a table once and keeps
//! the results; rendering never recomputes anything.

use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::groupby::{GroupMeans, TableGroupBy};
use crate::io::to_json_string;
use crate::na;
use crate::stats::{self, CorrelationMatrix, GroupedStats, SummaryStats};
use crate::table::{ColumnSpec, Table};

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Categorical column for grouped summaries
    pub group_by: Option<String>,
    /// Value-count rows kept per categorical column
    pub top_values: usize,
    /// Rows shown in the preview
    pub head_rows: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            group_by: None,
            top_values: 10,
            head_rows: 5,
        }
    }
}

impl ReportOptions {
    pub fn grouped_by(mut self, column: impl Into<String>) -> Self {
        self.group_by = Some(column.into());
        self
    }
}

/// Most frequent labels of one categorical column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub column: String,
    /// Number of distinct labels
    pub distinct: usize,
    pub top: Vec<(String, usize)>,
}

/// Everything computed per group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSection {
    pub group_column: String,
    pub sizes: Vec<(String, usize)>,
    pub summaries: Vec<GroupedStats>,
    pub means: GroupMeans,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub rows: usize,
    pub columns: Vec<ColumnSpec>,
    pub missing: Vec<(String, usize)>,
    pub summaries: Vec<(String, SummaryStats)>,
    pub distributions: Vec<Distribution>,
    pub groups: Option<GroupSection>,
    pub correlation: Option<CorrelationMatrix>,
    #[serde(skip)]
    head: String,
}

impl AnalysisReport {
    /// Runs every analysis over `table`.
    ///
    /// Numeric columns without any present value are left out of the
    /// summaries and the correlation matrix, as is a column sharing no
    /// complete row with an earlier one. An unknown or numeric group column
    /// is an error.
    pub fn build(table: &Table, options: &ReportOptions) -> Result<Self> {
        let mut summaries = Vec::new();
        for column in table.numeric_columns() {
            match stats::summarize(table, column) {
                Ok(summary) => summaries.push((column.to_string(), summary)),
                Err(Error::InsufficientData { .. }) => {
                    log::warn!("column '{}' has no values; skipped in summaries", column);
                }
                Err(e) => return Err(e),
            }
        }
        let summarized: Vec<&str> = summaries.iter().map(|(c, _)| c.as_str()).collect();

        let mut distributions = Vec::new();
        for column in table.categorical_columns() {
            let counts = stats::value_counts(table, column)?;
            distributions.push(Distribution {
                column: column.to_string(),
                distinct: counts.len(),
                top: counts.into_iter().take(options.top_values).collect(),
            });
        }

        let groups = match &options.group_by {
            Some(by) => Some(group_section(table, by, &summarized)?),
            None => None,
        };

        let correlated = correlated_columns(table, &summarized)?;
        let correlation = if correlated.len() >= 2 {
            Some(stats::correlation_matrix(table, &correlated)?)
        } else {
            None
        };

        Ok(AnalysisReport {
            rows: table.row_count(),
            columns: table.columns().to_vec(),
            missing: na::missing_counts(table),
            summaries,
            distributions,
            groups,
            correlation,
            head: format_head(table, options.head_rows),
        })
    }

    pub fn total_missing(&self) -> usize {
        self.missing.iter().map(|(_, n)| n).sum()
    }

    /// Sectioned plain-text report
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        section(out, "DATASET OVERVIEW")?;
        writeln!(out, "Shape: {} rows x {} columns", self.rows, self.columns.len())?;
        writeln!(out, "Columns:")?;
        for spec in &self.columns {
            writeln!(out, "  {} ({})", spec.name, spec.role)?;
        }
        writeln!(out)?;
        writeln!(out, "First rows:")?;
        out.push_str(&self.head);

        writeln!(out)?;
        writeln!(out, "Missing values:")?;
        let total = self.total_missing();
        if total == 0 {
            writeln!(out, "  none")?;
        } else {
            let cells = (self.rows * self.columns.len()).max(1);
            writeln!(
                out,
                "  total: {} ({:.2}% of cells)",
                total,
                100.0 * total as f64 / cells as f64
            )?;
            for (column, n) in self.missing.iter().filter(|(_, n)| *n > 0) {
                writeln!(out, "  {}: {}", column, n)?;
            }
        }

        section(out, "DESCRIPTIVE STATISTICS")?;
        if self.summaries.is_empty() {
            writeln!(out, "No numeric columns to summarize")?;
        } else {
            write_summary_table(out, "column", &self.summaries)?;
        }

        if !self.distributions.is_empty() {
            section(out, "DISTRIBUTIONS")?;
            for dist in &self.distributions {
                writeln!(out, "Column '{}' ({} distinct):", dist.column, dist.distinct)?;
                for (label, n) in &dist.top {
                    writeln!(out, "  {}: {}", label, n)?;
                }
                if dist.distinct > dist.top.len() {
                    writeln!(out, "  ... and {} more", dist.distinct - dist.top.len())?;
                }
            }
        }

        if let Some(groups) = &self.groups {
            section(out, &format!("BY {}", groups.group_column.to_uppercase()))?;
            for (key, n) in &groups.sizes {
                writeln!(out, "{}: {} rows", key, n)?;
            }
            for grouped in &groups.summaries {
                writeln!(out)?;
                writeln!(out, "{}:", grouped.column)?;
                let rows: Vec<(String, SummaryStats)> = grouped
                    .iter()
                    .map(|(k, s)| (k.to_string(), s.clone()))
                    .collect();
                write_summary_table(out, &groups.group_column, &rows)?;
            }
            writeln!(out)?;
            writeln!(out, "Means by {}:", groups.group_column)?;
            write_means_table(out, &groups.means)?;
        }

        if let Some(matrix) = &self.correlation {
            section(out, "CORRELATIONS")?;
            for (a, b, r) in matrix.pairs() {
                writeln!(out, "{} vs {}: {:.3}", a, b, r)?;
            }
        }
        Ok(())
    }

    /// Pretty JSON of the computed results
    pub fn to_json(&self) -> Result<String> {
        to_json_string(self)
    }
}

/// Columns, in order, that share complete rows with every earlier kept one
fn correlated_columns<'a>(table: &Table, columns: &[&'a str]) -> Result<Vec<&'a str>> {
    let mut kept: Vec<&'a str> = Vec::new();
    'columns: for &column in columns {
        for &other in &kept {
            let (x, _) = table.numeric_pairs(other, column)?;
            if x.is_empty() {
                log::warn!(
                    "no complete rows for {} vs {}; '{}' left out of the correlations",
                    other,
                    column,
                    column
                );
                continue 'columns;
            }
        }
        kept.push(column);
    }
    Ok(kept)
}

fn group_section(table: &Table, by: &str, columns: &[&str]) -> Result<GroupSection> {
    let grouped = TableGroupBy::new(table, by)?;

    let mut summaries = Vec::new();
    for column in columns {
        match grouped.summarize(column) {
            Ok(stats) => summaries.push(stats),
            Err(Error::InsufficientData { .. }) => {
                log::warn!("some '{}' group has no '{}' values; skipped", by, column);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(GroupSection {
        group_column: by.to_string(),
        sizes: grouped.size(),
        summaries,
        means: grouped.mean(columns)?,
    })
}

fn section(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn write_summary_table(
    out: &mut String,
    label: &str,
    rows: &[(String, SummaryStats)],
) -> std::fmt::Result {
    let width = rows
        .iter()
        .map(|(name, _)| name.len())
        .chain(std::iter::once(label.len()))
        .max()
        .unwrap_or(0);

    writeln!(
        out,
        "{:<width$} {:>6} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
        label, "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    )?;
    for (name, s) in rows {
        let std_text = s.std.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v));
        writeln!(
            out,
            "{:<width$} {:>6} {:>9.3} {:>9} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3}",
            name, s.count, s.mean, std_text, s.min, s.q1, s.median, s.q3, s.max
        )?;
    }
    Ok(())
}

fn write_means_table(out: &mut String, means: &GroupMeans) -> std::fmt::Result {
    let key_width = means
        .rows
        .iter()
        .map(|(k, _)| k.len())
        .chain(std::iter::once(means.group_column.len()))
        .max()
        .unwrap_or(0);

    write!(out, "{:<key_width$}", means.group_column)?;
    for column in &means.columns {
        write!(out, " {:>w$}", column, w = column.len().max(9))?;
    }
    writeln!(out)?;

    for (key, values) in &means.rows {
        write!(out, "{:<key_width$}", key)?;
        for (column, value) in means.columns.iter().zip(values) {
            let w = column.len().max(9);
            match value {
                Some(v) => write!(out, " {:>w$.3}", v)?,
                None => write!(out, " {:>w$}", "-")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// First `n` rows as an aligned `|`-separated table, missing cells as `NA`
pub fn format_head(table: &Table, n: usize) -> String {
    let header: Vec<String> = table.column_names().iter().map(|s| s.to_string()).collect();
    let body: Vec<Vec<String>> = table
        .rows()
        .iter()
        .take(n)
        .map(|row| {
            row.iter()
                .map(|cell| {
                    if cell.is_missing() {
                        "NA".to_string()
                    } else {
                        cell.to_string()
                    }
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            body.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(header[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in std::iter::once(&header).chain(body.iter()) {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<w$}", cell))
            .collect();
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
    }
    out
}
