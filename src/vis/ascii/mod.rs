//! Terminal charts
//!
//! Plain-text renderings of every dashboard panel. Always compiled, no
//! drawing backend needed.

mod charts;
mod summary;

pub use charts::{BarChart, Histogram, LinePlot, ScatterPlot};
pub(crate) use charts::bin_counts;
pub use summary::{BoxSummary, CorrelationGrid};

/// Chart rendering trait
pub trait Chart {
    /// Render the chart to a string
    fn render(&self) -> String;

    /// Render to stdout
    fn display(&self) {
        println!("{}", self.render());
    }
}

/// Common chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Chart width in characters
    pub width: usize,
    /// Chart height in lines
    pub height: usize,
    /// Show axis labels
    pub show_labels: bool,
    pub title: Option<String>,
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 15,
            show_labels: true,
            title: None,
            style: ChartStyle::default(),
        }
    }
}

impl ChartConfig {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub(crate) fn push_title(&self, output: &mut String, width: usize) {
        if let Some(ref title) = self.title {
            output.push_str(&format!("{:^width$}\n\n", title, width = width));
        }
    }

    pub(crate) fn bar_char(&self) -> char {
        match self.style {
            ChartStyle::Ascii => '#',
            ChartStyle::Unicode => '█',
        }
    }
}

/// Character set used for bars and frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    /// Plain ASCII characters
    Ascii,
    /// Unicode block characters
    #[default]
    Unicode,
}

pub(crate) fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Span used for scaling; 1.0 when all values are equal
pub(crate) fn span(lo: f64, hi: f64) -> f64 {
    if (hi - lo).abs() < f64::EPSILON {
        1.0
    } else {
        hi - lo
    }
}
