//! Plotters dashboard: every panel of a plan in one cell of a 2x3 grid

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::ascii::bin_counts;
use super::{ChartPlan, Panel, PlotSettings};
use crate::error::Result;
use crate::stats::CorrelationMatrix;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 20);

pub(super) fn draw_png(plan: &ChartPlan, path: &Path, settings: &PlotSettings) -> Result<()> {
    let root = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
    draw(plan, root, settings)
}

pub(super) fn draw_svg(plan: &ChartPlan, path: &Path, settings: &PlotSettings) -> Result<()> {
    let root = SVGBackend::new(path, (settings.width, settings.height)).into_drawing_area();
    draw(plan, root, settings)
}

fn draw<DB>(plan: &ChartPlan, root: DrawingArea<DB, Shift>, settings: &PlotSettings) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let root = root.titled(&settings.title, ("sans-serif", 30))?;

    let cells = root.split_evenly((2, 3));
    for (area, panel) in cells.iter().zip(plan.panels()) {
        let title = panel.title();
        match panel {
            Panel::Histogram { values, .. } => histogram(area, &title, values, settings)?,
            Panel::Bar { labels, values, .. } => bars(area, &title, labels, values, settings)?,
            Panel::BoxPlot(series) => {
                let named: Vec<(&str, &[f64])> = series
                    .iter()
                    .map(|s| (s.name.as_str(), s.values.as_slice()))
                    .collect();
                boxes(area, &title, &named, settings)?
            }
            Panel::Correlation(matrix) => heatmap(area, &title, matrix)?,
            Panel::Scatter {
                x_column,
                y_column,
                series,
            } => scatter(area, &title, (x_column.as_str(), y_column.as_str()), series, settings)?,
            Panel::Line { columns, series } => lines(area, &title, columns, series, settings)?,
        }
    }

    root.present()?;
    Ok(())
}

fn rgb(settings: &PlotSettings, idx: usize) -> RGBColor {
    let (r, g, b) = settings.color(idx);
    RGBColor(r, g, b)
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 0.5, hi + 0.5);
    }
    let margin = (hi - lo) * 0.05;
    (lo - margin, hi + margin)
}

fn segment_label(labels: &[String], value: &SegmentValue<usize>) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

fn histogram<DB>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    values: &[f64],
    settings: &PlotSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (edges, counts) = bin_counts(values, settings.bins);
    let (x_lo, x_hi) = bounds(edges.iter().copied());
    let max_count = counts.iter().copied().max().unwrap_or(0) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(title, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_lo..x_hi, 0.0..(max_count * 1.1).max(1.0))?;

    let x_fmt = |v: &f64| format!("{:.1}", v);
    let mut mesh = chart.configure_mesh();
    if !settings.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_label_formatter(&x_fmt)
        .y_desc("Frequency")
        .draw()?;

    let color = rgb(settings, 0);
    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        Rectangle::new([(edges[i], 0.0), (edges[i + 1], count as f64)], color.filled())
    }))?;
    Ok(())
}

fn bars<DB>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    labels: &[String],
    values: &[f64],
    settings: &PlotSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let top = values.iter().copied().fold(0.0, f64::max).max(1.0) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(title, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0.0..top)?;

    let x_fmt = |v: &SegmentValue<usize>| segment_label(labels, v);
    let mut mesh = chart.configure_mesh();
    if !settings.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_labels(labels.len())
        .x_label_formatter(&x_fmt)
        .draw()?;

    let color = rgb(settings, 0);
    chart.draw_series(
        Histogram::vertical(&chart)
            .style(color.filled())
            .margin(10)
            .data(values.iter().enumerate().map(|(i, &v)| (i, v))),
    )?;
    Ok(())
}

fn boxes<DB>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    series: &[(&str, &[f64])],
    settings: &PlotSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let labels: Vec<String> = series.iter().map(|(n, _)| n.to_string()).collect();
    let (lo, hi) = bounds(series.iter().flat_map(|(_, v)| v.iter().copied()));

    let mut chart = ChartBuilder::on(area)
        .caption(title, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d((0..series.len()).into_segmented(), (lo as f32)..(hi as f32))?;

    let x_fmt = |v: &SegmentValue<usize>| segment_label(&labels, v);
    let mut mesh = chart.configure_mesh();
    if !settings.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_labels(series.len())
        .x_label_formatter(&x_fmt)
        .draw()?;

    chart.draw_series(series.iter().enumerate().map(|(i, (_, values))| {
        Boxplot::new_vertical(SegmentValue::CenterOf(i), &Quartiles::new(*values))
            .width(30)
            .whisker_width(0.5)
            .style(rgb(settings, i))
    }))?;
    Ok(())
}

/// Cell color from blue (-1) through white (0) to red (1)
fn diverging(r: f64) -> RGBColor {
    let t = r.clamp(-1.0, 1.0);
    let fade = (255.0 * (1.0 - t.abs())).round() as u8;
    if t >= 0.0 {
        RGBColor(255, fade, fade)
    } else {
        RGBColor(fade, fade, 255)
    }
}

fn heatmap<DB>(area: &DrawingArea<DB, Shift>, title: &str, matrix: &CorrelationMatrix) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let n = matrix.len();
    let labels = matrix.columns().to_vec();

    let mut chart = ChartBuilder::on(area)
        .caption(title, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(80)
        .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())?;

    let fmt = |v: &SegmentValue<usize>| segment_label(&labels, v);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&fmt)
        .y_label_formatter(&fmt)
        .draw()?;

    let cells: Vec<(usize, usize, f64)> = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .map(|(i, j)| (i, j, matrix.values()[i][j]))
        .collect();

    chart.draw_series(cells.iter().map(|&(i, j, r)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(j), SegmentValue::Exact(i)),
                (SegmentValue::Exact(j + 1), SegmentValue::Exact(i + 1)),
            ],
            diverging(r).filled(),
        )
    }))?;
    chart.draw_series(cells.iter().map(|&(i, j, r)| {
        Text::new(
            format!("{:.2}", r),
            (SegmentValue::CenterOf(j), SegmentValue::CenterOf(i)),
            ("sans-serif", 14).into_font(),
        )
    }))?;
    Ok(())
}

fn scatter<DB>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    (x_label, y_label): (&str, &str),
    series: &[(String, Vec<(f64, f64)>)],
    settings: &PlotSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let points = || series.iter().flat_map(|(_, pts)| pts.iter());
    let (x_lo, x_hi) = bounds(points().map(|p| p.0));
    let (y_lo, y_hi) = bounds(points().map(|p| p.1));

    let mut chart = ChartBuilder::on(area)
        .caption(title, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    let mut mesh = chart.configure_mesh();
    if !settings.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(x_label).y_desc(y_label).draw()?;

    for (i, (name, pts)) in series.iter().enumerate() {
        let color = rgb(settings, i);
        chart
            .draw_series(pts.iter().map(|&p| Circle::new(p, 3, color.filled())))?
            .label(name.clone())
            .legend(move |(x, y)| Circle::new((x + 10, y), 3, color.filled()));
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }
    Ok(())
}

fn lines<DB>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    columns: &[String],
    series: &[(String, Vec<f64>)],
    settings: &PlotSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (lo, hi) = bounds(series.iter().flat_map(|(_, v)| v.iter().copied()));

    let mut chart = ChartBuilder::on(area)
        .caption(title, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d((0..columns.len()).into_segmented(), lo..hi)?;

    let x_fmt = |v: &SegmentValue<usize>| segment_label(columns, v);
    let mut mesh = chart.configure_mesh();
    if !settings.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_labels(columns.len())
        .x_label_formatter(&x_fmt)
        .draw()?;

    for (i, (name, means)) in series.iter().enumerate() {
        let color = rgb(settings, i);
        let points: Vec<(SegmentValue<usize>, f64)> = means
            .iter()
            .enumerate()
            .map(|(j, &m)| (SegmentValue::CenterOf(j), m))
            .collect();
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart.draw_series(points.into_iter().map(|p| Circle::new(p, 4, color.filled())))?;
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;

    #[test]
    fn test_svg_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.svg");
        let table = dataset::iris().unwrap();
        let plan = ChartPlan::from_table(&table, Some("species")).unwrap();

        draw_svg(&plan, &path, &PlotSettings::default()).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Correlation matrix"));
    }

    #[test]
    fn test_diverging_colors() {
        assert_eq!(diverging(1.0), RGBColor(255, 0, 0));
        assert_eq!(diverging(-1.0), RGBColor(0, 0, 255));
        assert_eq!(diverging(0.0), RGBColor(255, 255, 255));
    }
}
