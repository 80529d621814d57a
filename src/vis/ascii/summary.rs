//! Box-plot lines and the correlation grid

use super::{min_max, span, Chart, ChartConfig};
use crate::stats::{CorrelationMatrix, SummaryStats};

/// Five-number summaries drawn on a shared horizontal scale
///
/// ```text
///   sepal_length │   ├────[═══│═══]──────┤       │ 4.30 5.10 5.80 6.40 7.90
/// ```
#[derive(Debug, Clone)]
pub struct BoxSummary {
    rows: Vec<(String, SummaryStats)>,
    config: ChartConfig,
}

impl BoxSummary {
    pub fn new(rows: Vec<(String, SummaryStats)>, config: ChartConfig) -> Self {
        Self { rows, config }
    }
}

impl Chart for BoxSummary {
    fn render(&self) -> String {
        let Some((lo, hi)) = min_max(self.rows.iter().flat_map(|(_, s)| [s.min, s.max])) else {
            return String::from("No data to display");
        };

        let name_width = self.rows.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
        let width = self
            .config
            .width
            .saturating_sub(name_width + 4)
            .clamp(10, 60);
        let range = span(lo, hi);
        let pos = |v: f64| (((v - lo) / range) * (width - 1) as f64).round() as usize;

        let mut output = String::new();
        self.config.push_title(&mut output, self.config.width);

        for (name, s) in &self.rows {
            let mut line = vec![' '; width];
            let (p_min, p_q1, p_med, p_q3, p_max) =
                (pos(s.min), pos(s.q1), pos(s.median), pos(s.q3), pos(s.max));
            for cell in line.iter_mut().take(p_q1).skip(p_min) {
                *cell = '─';
            }
            for cell in line.iter_mut().take(p_max + 1).skip(p_q3) {
                *cell = '─';
            }
            for cell in line.iter_mut().take(p_q3).skip(p_q1) {
                *cell = '═';
            }
            line[p_min] = '├';
            line[p_max] = '┤';
            line[p_q1] = '[';
            line[p_q3] = ']';
            line[p_med] = '│';

            let body: String = line.into_iter().collect();
            output.push_str(&format!(
                "{:>nw$} │{}│ {:.2} {:.2} {:.2} {:.2} {:.2}\n",
                name,
                body,
                s.min,
                s.q1,
                s.median,
                s.q3,
                s.max,
                nw = name_width
            ));
        }

        output
    }
}

/// Correlation coefficients with a shade per cell
#[derive(Debug, Clone)]
pub struct CorrelationGrid<'a> {
    matrix: &'a CorrelationMatrix,
    config: ChartConfig,
}

impl<'a> CorrelationGrid<'a> {
    pub fn new(matrix: &'a CorrelationMatrix, config: ChartConfig) -> Self {
        Self { matrix, config }
    }

    fn shade(r: f64) -> char {
        match r.abs() {
            a if a >= 0.8 => '█',
            a if a >= 0.6 => '▓',
            a if a >= 0.4 => '▒',
            a if a >= 0.2 => '░',
            _ => ' ',
        }
    }
}

impl Chart for CorrelationGrid<'_> {
    fn render(&self) -> String {
        if self.matrix.is_empty() {
            return String::from("No data to display");
        }

        let names = self.matrix.columns();
        let name_width = names.iter().map(|n| n.len()).max().unwrap_or(0);
        let cell = 8;

        let mut output = String::new();
        self.config
            .push_title(&mut output, name_width + cell * names.len());

        output.push_str(&" ".repeat(name_width + 1));
        for name in names {
            let short: String = name.chars().take(cell - 1).collect();
            output.push_str(&format!("{:>cell$}", short));
        }
        output.push('\n');

        for (name, row) in names.iter().zip(self.matrix.values()) {
            output.push_str(&format!("{:>name_width$} ", name));
            for &r in row {
                output.push_str(&format!(" {}{:>6.2}", Self::shade(r), r));
            }
            output.push('\n');
        }

        output
    }
}
