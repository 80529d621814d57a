//! Histogram, bar, scatter and line charts

use super::{min_max, span, Chart, ChartConfig, ChartStyle};

/// Markers assigned to series in order
const MARKERS: [char; 6] = ['●', '▲', '■', '◆', '+', 'x'];
const ASCII_MARKERS: [char; 6] = ['o', '^', '#', '*', '+', 'x'];

fn marker(style: ChartStyle, idx: usize) -> char {
    match style {
        ChartStyle::Ascii => ASCII_MARKERS[idx % ASCII_MARKERS.len()],
        ChartStyle::Unicode => MARKERS[idx % MARKERS.len()],
    }
}

fn legend(output: &mut String, style: ChartStyle, names: &[&str]) {
    if names.len() < 2 {
        return;
    }
    let entries: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{} {}", marker(style, i), name))
        .collect();
    output.push_str(&format!("        {}\n", entries.join("   ")));
}

// ============================================================================
// Histogram
// ============================================================================

/// Equal-width histogram of one column
#[derive(Debug, Clone)]
pub struct Histogram {
    bin_edges: Vec<f64>,
    counts: Vec<usize>,
    config: ChartConfig,
}

impl Histogram {
    pub fn new(data: &[f64], bins: usize) -> Self {
        Self::with_config(data, bins, ChartConfig::default())
    }

    pub fn with_config(data: &[f64], bins: usize, config: ChartConfig) -> Self {
        let (bin_edges, counts) = bin_counts(data, bins);
        Self {
            bin_edges,
            counts,
            config,
        }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn edges(&self) -> &[f64] {
        &self.bin_edges
    }
}

/// Bin edges and counts; the maximum lands in the last bin
pub(crate) fn bin_counts(data: &[f64], bins: usize) -> (Vec<f64>, Vec<usize>) {
    let Some((min, max)) = min_max(data.iter().copied()) else {
        return (vec![], vec![]);
    };
    if bins == 0 {
        return (vec![], vec![]);
    }
    if (max - min).abs() < f64::EPSILON {
        return (vec![min, max], vec![data.len()]);
    }

    let bin_width = (max - min) / bins as f64;
    let edges = (0..=bins).map(|i| min + i as f64 * bin_width).collect();
    let mut counts = vec![0; bins];
    for &value in data {
        let idx = ((value - min) / bin_width).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }
    (edges, counts)
}

impl Chart for Histogram {
    fn render(&self) -> String {
        if self.counts.is_empty() {
            return String::from("No data to display");
        }

        let mut output = String::new();
        self.config.push_title(&mut output, self.config.width);

        let max_count = self.counts.iter().copied().max().unwrap_or(1).max(1);
        let bar_width = self.config.width.saturating_sub(22);
        let bar_char = self.config.bar_char();

        for (i, &count) in self.counts.iter().enumerate() {
            let bar_len = (count as f64 / max_count as f64 * bar_width as f64).round() as usize;
            let bar: String = std::iter::repeat(bar_char).take(bar_len).collect();
            output.push_str(&format!(
                "{:>7.2}-{:<7.2} │{:<width$}│ {}\n",
                self.bin_edges[i],
                self.bin_edges[i + 1],
                bar,
                count,
                width = bar_width
            ));
        }

        output
    }
}

// ============================================================================
// Bar Chart
// ============================================================================

/// Horizontal bars, one per label
#[derive(Debug, Clone)]
pub struct BarChart {
    labels: Vec<String>,
    values: Vec<f64>,
    config: ChartConfig,
    label_width: usize,
}

impl BarChart {
    pub fn new(labels: &[&str], values: &[f64]) -> Self {
        Self::with_config(labels, values, ChartConfig::default())
    }

    pub fn with_config(labels: &[&str], values: &[f64], config: ChartConfig) -> Self {
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0).min(16);
        Self {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            values: values.to_vec(),
            config,
            label_width,
        }
    }
}

impl Chart for BarChart {
    fn render(&self) -> String {
        if self.values.is_empty() {
            return String::from("No data to display");
        }

        let mut output = String::new();
        self.config.push_title(&mut output, self.config.width);

        let max_val = self.values.iter().copied().fold(0.0, f64::max);
        let bar_width = self.config.width.saturating_sub(self.label_width + 12);
        let bar_char = self.config.bar_char();

        for (label, &value) in self.labels.iter().zip(&self.values) {
            let bar_len = if max_val > 0.0 && value > 0.0 {
                (value / max_val * bar_width as f64).round() as usize
            } else {
                0
            };
            let bar: String = std::iter::repeat(bar_char).take(bar_len).collect();
            let truncated: String = label.chars().take(self.label_width).collect();
            output.push_str(&format!(
                "{:>lw$} │{:<bw$}│ {:.2}\n",
                truncated,
                bar,
                value,
                lw = self.label_width,
                bw = bar_width
            ));
        }

        output
    }
}

// ============================================================================
// Scatter Plot
// ============================================================================

/// Points of one or more named series on shared axes
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    series: Vec<(String, Vec<(f64, f64)>)>,
    config: ChartConfig,
}

impl ScatterPlot {
    pub fn new(x: &[f64], y: &[f64]) -> Self {
        let points = x.iter().copied().zip(y.iter().copied()).collect();
        Self::with_series(vec![(String::new(), points)], ChartConfig::default())
    }

    pub fn with_series(series: Vec<(String, Vec<(f64, f64)>)>, config: ChartConfig) -> Self {
        Self { series, config }
    }
}

impl Chart for ScatterPlot {
    fn render(&self) -> String {
        let all = self.series.iter().flat_map(|(_, pts)| pts.iter());
        let (Some((x_min, x_max)), Some((y_min, y_max))) = (
            min_max(all.clone().map(|p| p.0)),
            min_max(all.map(|p| p.1)),
        ) else {
            return String::from("No data to display");
        };

        let height = self.config.height.max(2);
        let width = self.config.width.saturating_sub(8).max(10);
        let x_range = span(x_min, x_max);
        let y_range = span(y_min, y_max);

        let mut grid = vec![vec![' '; width]; height];
        for (idx, (_, points)) in self.series.iter().enumerate() {
            let m = marker(self.config.style, idx);
            for &(x, y) in points {
                let px = ((x - x_min) / x_range * (width - 1) as f64).round() as usize;
                let py = ((y - y_min) / y_range * (height - 1) as f64).round() as usize;
                grid[py.min(height - 1)][px.min(width - 1)] = m;
            }
        }

        let mut output = String::new();
        self.config.push_title(&mut output, width + 8);

        for row in (0..height).rev() {
            if self.config.show_labels {
                let y_val = y_min + (row as f64 / (height - 1) as f64) * y_range;
                output.push_str(&format!("{:>6.1} │", y_val));
            }
            output.extend(grid[row].iter());
            output.push('\n');
        }

        if self.config.show_labels {
            output.push_str("       └");
            output.push_str(&"─".repeat(width));
            output.push('\n');
            output.push_str(&format!(
                "        {:<w$.1}{:>8.1}\n",
                x_min,
                x_max,
                w = width.saturating_sub(8)
            ));
        }

        let names: Vec<&str> = self.series.iter().map(|(n, _)| n.as_str()).collect();
        legend(&mut output, self.config.style, &names);
        output
    }
}

// ============================================================================
// Line Plot
// ============================================================================

/// Named series over a shared sequence of labelled positions
#[derive(Debug, Clone)]
pub struct LinePlot {
    positions: Vec<String>,
    series: Vec<(String, Vec<f64>)>,
    config: ChartConfig,
}

impl LinePlot {
    pub fn new(positions: &[&str], series: Vec<(String, Vec<f64>)>) -> Self {
        Self::with_config(positions, series, ChartConfig::default())
    }

    pub fn with_config(
        positions: &[&str],
        series: Vec<(String, Vec<f64>)>,
        config: ChartConfig,
    ) -> Self {
        Self {
            positions: positions.iter().map(|s| s.to_string()).collect(),
            series,
            config,
        }
    }
}

impl Chart for LinePlot {
    fn render(&self) -> String {
        let Some((min_val, max_val)) =
            min_max(self.series.iter().flat_map(|(_, v)| v.iter().copied()))
        else {
            return String::from("No data to display");
        };
        if self.positions.is_empty() {
            return String::from("No data to display");
        }

        let height = self.config.height.max(2);
        let slot = (self.config.width.saturating_sub(8) / self.positions.len()).max(3);
        let width = slot * self.positions.len();
        let range = span(min_val, max_val);

        let mut grid = vec![vec![' '; width]; height];
        for (idx, (_, values)) in self.series.iter().enumerate() {
            let m = marker(self.config.style, idx);
            let cells: Vec<(usize, usize)> = values
                .iter()
                .take(self.positions.len())
                .enumerate()
                .map(|(i, &v)| {
                    let col = i * slot + slot / 2;
                    let row = ((v - min_val) / range * (height - 1) as f64).round() as usize;
                    (col, row.min(height - 1))
                })
                .collect();

            // Dots between neighbouring points, markers on top
            for pair in cells.windows(2) {
                let ((c0, r0), (c1, r1)) = (pair[0], pair[1]);
                for c in (c0 + 1)..c1 {
                    let t = (c - c0) as f64 / (c1 - c0) as f64;
                    let r = (r0 as f64 + t * (r1 as f64 - r0 as f64)).round() as usize;
                    if grid[r][c] == ' ' {
                        grid[r][c] = '·';
                    }
                }
            }
            for (c, r) in cells {
                grid[r][c] = m;
            }
        }

        let mut output = String::new();
        self.config.push_title(&mut output, width + 8);

        for row in (0..height).rev() {
            if self.config.show_labels {
                let y_val = min_val + (row as f64 / (height - 1) as f64) * range;
                output.push_str(&format!("{:>6.1} │", y_val));
            }
            output.extend(grid[row].iter());
            output.push('\n');
        }

        if self.config.show_labels {
            output.push_str("       └");
            output.push_str(&"─".repeat(width));
            output.push('\n');
            output.push_str("        ");
            for label in &self.positions {
                let short: String = label.chars().take(slot - 1).collect();
                output.push_str(&format!("{:^slot$}", short));
            }
            output.push('\n');
        }

        let names: Vec<&str> = self.series.iter().map(|(n, _)| n.as_str()).collect();
        legend(&mut output, self.config.style, &names);
        output
    }
}
