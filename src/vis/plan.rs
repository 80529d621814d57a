use crate::error::{Error, Result};
use crate::groupby::TableGroupBy;
use crate::stats::{self, descriptive, CorrelationMatrix, SummaryStats};
use crate::table::Table;

use super::ChartKind;

/// Columns shown side by side in the box-plot panel
const MAX_BOX_COLUMNS: usize = 3;

/// One column's values and their five-number summary
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub stats: SummaryStats,
}

/// Data behind one dashboard cell
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Histogram {
        column: String,
        values: Vec<f64>,
    },
    Bar {
        title: String,
        labels: Vec<String>,
        values: Vec<f64>,
    },
    BoxPlot(Vec<BoxSeries>),
    Correlation(CorrelationMatrix),
    /// Points of two columns, one series per group
    Scatter {
        x_column: String,
        y_column: String,
        series: Vec<(String, Vec<(f64, f64)>)>,
    },
    /// Means across the numeric columns, one series per group
    Line {
        columns: Vec<String>,
        series: Vec<(String, Vec<f64>)>,
    },
}

impl Panel {
    pub fn kind(&self) -> ChartKind {
        match self {
            Panel::Histogram { .. } => ChartKind::Histogram,
            Panel::Bar { .. } => ChartKind::Bar,
            Panel::BoxPlot(_) => ChartKind::BoxPlot,
            Panel::Correlation(_) => ChartKind::Correlation,
            Panel::Scatter { .. } => ChartKind::Scatter,
            Panel::Line { .. } => ChartKind::Line,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Panel::Histogram { column, .. } => format!("Distribution of {}", column),
            Panel::Bar { title, .. } => title.clone(),
            Panel::BoxPlot(_) => "Box plot".to_string(),
            Panel::Correlation(_) => "Correlation matrix".to_string(),
            Panel::Scatter {
                x_column, y_column, ..
            } => format!("{} vs {}", x_column, y_column),
            Panel::Line { series, .. } if series.len() > 1 => "Means by group".to_string(),
            Panel::Line { .. } => "Column means".to_string(),
        }
    }
}

/// Which panels a table supports and the data each one draws
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    group_column: Option<String>,
    panels: Vec<Panel>,
}

impl ChartPlan {
    /// Picks the data for every panel.
    ///
    /// Histogram of the first numeric column; bar chart of its group means
    /// (or of the first categorical column's counts when ungrouped); box plot
    /// of up to three numeric columns; correlation of all numeric columns;
    /// scatter of the first two numeric columns; line of means across the
    /// numeric columns. Numeric columns without values are ignored, and a
    /// panel without enough data is left out.
    pub fn from_table(table: &Table, group_column: Option<&str>) -> Result<Self> {
        let grouped = group_column
            .map(|by| TableGroupBy::new(table, by))
            .transpose()?;

        let mut numeric: Vec<(&str, Vec<f64>)> = Vec::new();
        for name in table.numeric_columns() {
            let values = table.numeric_values(name)?;
            if !values.is_empty() {
                numeric.push((name, values));
            }
        }
        let names: Vec<&str> = numeric.iter().map(|(n, _)| *n).collect();

        let mut panels = Vec::new();

        match numeric.first() {
            Some((name, values)) => panels.push(Panel::Histogram {
                column: name.to_string(),
                values: values.clone(),
            }),
            None => skip(ChartKind::Histogram, "no numeric column"),
        }

        match bar_panel(table, grouped.as_ref(), &names)? {
            Some(panel) => panels.push(panel),
            None => skip(ChartKind::Bar, "nothing to count or average"),
        }

        if numeric.is_empty() {
            skip(ChartKind::BoxPlot, "no numeric column");
        } else {
            let mut series = Vec::new();
            for (name, values) in numeric.iter().take(MAX_BOX_COLUMNS) {
                series.push(BoxSeries {
                    name: name.to_string(),
                    values: values.clone(),
                    stats: stats::summarize(table, name)?,
                });
            }
            panels.push(Panel::BoxPlot(series));
        }

        if names.len() < 2 {
            skip(ChartKind::Correlation, "fewer than two numeric columns");
            skip(ChartKind::Scatter, "fewer than two numeric columns");
            skip(ChartKind::Line, "fewer than two numeric columns");
            return Ok(ChartPlan {
                group_column: group_column.map(str::to_string),
                panels,
            });
        }

        match stats::correlation_matrix(table, &names) {
            Ok(matrix) => panels.push(Panel::Correlation(matrix)),
            Err(Error::InsufficientData { .. }) => {
                skip(ChartKind::Correlation, "a column pair has no complete rows")
            }
            Err(e) => return Err(e),
        }

        let scatter = scatter_series(table, grouped.as_ref(), names[0], names[1])?;
        if scatter.iter().any(|(_, pts)| !pts.is_empty()) {
            panels.push(Panel::Scatter {
                x_column: names[0].to_string(),
                y_column: names[1].to_string(),
                series: scatter,
            });
        } else {
            skip(ChartKind::Scatter, "no complete rows");
        }

        let line = line_series(grouped.as_ref(), &numeric, &names)?;
        if line.is_empty() {
            skip(ChartKind::Line, "no group has every column");
        } else {
            panels.push(Panel::Line {
                columns: names.iter().map(|n| n.to_string()).collect(),
                series: line,
            });
        }

        Ok(ChartPlan {
            group_column: group_column.map(str::to_string),
            panels,
        })
    }

    pub fn group_column(&self) -> Option<&str> {
        self.group_column.as_deref()
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn kinds(&self) -> Vec<ChartKind> {
        self.panels.iter().map(Panel::kind).collect()
    }

    pub fn get(&self, kind: ChartKind) -> Option<&Panel> {
        self.panels.iter().find(|p| p.kind() == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

fn skip(kind: ChartKind, reason: &str) {
    log::info!("{} chart skipped: {}", kind, reason);
}

fn bar_panel(
    table: &Table,
    grouped: Option<&TableGroupBy<'_>>,
    numeric: &[&str],
) -> Result<Option<Panel>> {
    if let (Some(gb), Some(first)) = (grouped, numeric.first()) {
        let means = gb.mean(&[*first])?;
        let (labels, values): (Vec<String>, Vec<f64>) = means
            .rows
            .into_iter()
            .filter_map(|(key, m)| m[0].map(|v| (key, v)))
            .unzip();
        if labels.is_empty() {
            return Ok(None);
        }
        return Ok(Some(Panel::Bar {
            title: format!("Mean {} by {}", first, gb.by()),
            labels,
            values,
        }));
    }

    let Some(column) = table.categorical_columns().first().copied() else {
        return Ok(None);
    };
    let counts = stats::value_counts(table, column)?;
    if counts.is_empty() {
        return Ok(None);
    }
    let (labels, values) = counts.into_iter().map(|(k, n)| (k, n as f64)).unzip();
    Ok(Some(Panel::Bar {
        title: format!("Counts of {}", column),
        labels,
        values,
    }))
}

fn scatter_series(
    table: &Table,
    grouped: Option<&TableGroupBy<'_>>,
    x: &str,
    y: &str,
) -> Result<Vec<(String, Vec<(f64, f64)>)>> {
    let zip = |(xs, ys): (Vec<f64>, Vec<f64>)| xs.into_iter().zip(ys).collect::<Vec<_>>();
    match grouped {
        Some(gb) => gb
            .iter()
            .map(|(key, rows)| -> Result<(String, Vec<(f64, f64)>)> {
                let pairs = table.select_rows(rows).numeric_pairs(x, y)?;
                Ok((key.to_string(), zip(pairs)))
            })
            .collect(),
        None => Ok(vec![("all".to_string(), zip(table.numeric_pairs(x, y)?))]),
    }
}

fn line_series(
    grouped: Option<&TableGroupBy<'_>>,
    numeric: &[(&str, Vec<f64>)],
    names: &[&str],
) -> Result<Vec<(String, Vec<f64>)>> {
    match grouped {
        Some(gb) => Ok(gb
            .mean(names)?
            .rows
            .into_iter()
            .filter_map(|(key, means)| Some((key, means.into_iter().collect::<Option<Vec<f64>>>()?)))
            .collect()),
        None => {
            let means = numeric
                .iter()
                .map(|(_, values)| descriptive::mean(values))
                .collect();
            Ok(vec![("mean".to_string(), means)])
        }
    }
}
