//! Charts for an analysed table
//!
//! A [`ChartPlan`] decides which panels a table supports and extracts their
//! data. The plan is then rendered either as text through the `ascii`
//! submodule, which is always available, or as a 2x3 PNG/SVG dashboard
//! through plotters when the `visualization` feature is enabled.

pub mod ascii;
#[cfg(feature = "visualization")]
mod dashboard;
mod plan;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use self::ascii::{
    BarChart, BoxSummary, Chart, ChartConfig, ChartStyle, CorrelationGrid, Histogram, LinePlot,
    ScatterPlot,
};
pub use self::plan::{BoxSeries, ChartPlan, Panel};

/// Kinds of dashboard panels, in layout order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Histogram,
    Bar,
    BoxPlot,
    Correlation,
    Scatter,
    Line,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Histogram => "histogram",
            ChartKind::Bar => "bar",
            ChartKind::BoxPlot => "box plot",
            ChartKind::Correlation => "correlation",
            ChartKind::Scatter => "scatter",
            ChartKind::Line => "line",
        };
        f.write_str(name)
    }
}

/// Where charts go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Text on the terminal
    #[default]
    Ascii,
    /// PNG image
    Png,
    /// SVG image
    Svg,
}

impl OutputFormat {
    /// File extension of image formats
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Ascii => None,
            OutputFormat::Png => Some("png"),
            OutputFormat::Svg => Some("svg"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Ascii => f.write_str("ascii"),
            OutputFormat::Png => f.write_str("png"),
            OutputFormat::Svg => f.write_str("svg"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" | "text" => Ok(OutputFormat::Ascii),
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(Error::InvalidInput(format!(
                "unknown chart format '{}', expected ascii, png or svg",
                other
            ))),
        }
    }
}

/// Dashboard settings
#[derive(Debug, Clone)]
pub struct PlotSettings {
    pub title: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Histogram bins
    pub bins: usize,
    pub show_grid: bool,
    /// Series colors, reused cyclically
    pub color_palette: Vec<(u8, u8, u8)>,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            title: "Data analysis".to_string(),
            width: 1500,
            height: 1000,
            bins: 20,
            show_grid: true,
            color_palette: vec![
                (0, 123, 255),
                (255, 99, 71),
                (46, 204, 113),
                (255, 193, 7),
                (142, 68, 173),
                (52, 152, 219),
                (243, 156, 18),
                (211, 84, 0),
            ],
        }
    }
}

impl PlotSettings {
    /// Palette entry for the `idx`-th series
    pub fn color(&self, idx: usize) -> (u8, u8, u8) {
        if self.color_palette.is_empty() {
            return (0, 0, 0);
        }
        self.color_palette[idx % self.color_palette.len()]
    }
}

/// Text rendering of every panel in the plan
pub fn render_ascii(plan: &ChartPlan, settings: &PlotSettings) -> String {
    let mut output = String::new();
    for panel in plan.panels() {
        let config = ChartConfig::titled(panel.title());
        let chart = match panel {
            Panel::Histogram { values, .. } => {
                Histogram::with_config(values, settings.bins, config).render()
            }
            Panel::Bar { labels, values, .. } => {
                let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
                BarChart::with_config(&labels, values, config).render()
            }
            Panel::BoxPlot(series) => {
                let rows = series
                    .iter()
                    .map(|s| (s.name.clone(), s.stats.clone()))
                    .collect();
                BoxSummary::new(rows, config).render()
            }
            Panel::Correlation(matrix) => CorrelationGrid::new(matrix, config).render(),
            Panel::Scatter { series, .. } => {
                ScatterPlot::with_series(series.clone(), config).render()
            }
            Panel::Line { columns, series } => {
                let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
                LinePlot::with_config(&columns, series.clone(), config).render()
            }
        };
        output.push_str(&chart);
        output.push('\n');
    }
    output
}

/// Saves the plan as a PNG or SVG dashboard
#[cfg(feature = "visualization")]
pub fn write_dashboard<P: AsRef<Path>>(
    plan: &ChartPlan,
    path: P,
    format: OutputFormat,
    settings: &PlotSettings,
) -> Result<()> {
    let path = path.as_ref();
    match format {
        OutputFormat::Png => dashboard::draw_png(plan, path, settings)?,
        OutputFormat::Svg => dashboard::draw_svg(plan, path, settings)?,
        OutputFormat::Ascii => {
            return Err(Error::InvalidInput(
                "ascii charts are rendered as text, not saved".into(),
            ))
        }
    }
    log::info!("dashboard saved to {}", path.display());
    Ok(())
}

/// Saves the plan as a PNG or SVG dashboard
#[cfg(not(feature = "visualization"))]
pub fn write_dashboard<P: AsRef<Path>>(
    _plan: &ChartPlan,
    _path: P,
    format: OutputFormat,
    _settings: &PlotSettings,
) -> Result<()> {
    Err(Error::Visualization(format!(
        "{} output needs the `visualization` feature",
        format
    )))
}
