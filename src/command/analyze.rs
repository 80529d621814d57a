use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tabstats::{
    dataset, io, na, vis, AnalysisConfig, AnalysisReport, ChartPlan, OutputFormat, PlotSettings,
    ReportOptions, Table,
};

/// Flags shared by every analysis mode; each one overrides the config file
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Categorical column to group by
    #[arg(long, value_name = "COLUMN")]
    group_by: Option<String>,
    /// Columns to read as categorical
    #[arg(long, value_name = "COLUMN", value_delimiter = ',')]
    categorical: Vec<String>,
    /// Field separator
    #[arg(long)]
    delimiter: Option<char>,
    /// Keep missing values instead of filling them
    #[arg(long)]
    no_impute: bool,
    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,
    /// Chart output: ascii, png or svg
    #[arg(long, value_name = "FORMAT")]
    format: Option<OutputFormat>,
    /// Directory for chart images
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Histogram bins
    #[arg(long)]
    bins: Option<usize>,
    /// Write the report as JSON to this file
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DemoArg {
    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Also write the generated dataset to this CSV file
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,
    #[clap(flatten)]
    analyze: AnalyzeArg,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CsvArg {
    /// Delimited text file to analyze
    path: PathBuf,
    #[clap(flatten)]
    analyze: AnalyzeArg,
}

impl AnalyzeArg {
    /// Config file (or defaults) with the command-line overrides applied
    fn resolve(&self, default_group: Option<&str>) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => AnalysisConfig::default(),
        };

        if config.group_by.is_none() {
            config.group_by = default_group.map(str::to_string);
        }
        if let Some(group_by) = &self.group_by {
            config.group_by = Some(group_by.clone());
        }
        config.categorical.extend(self.categorical.iter().cloned());
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter.to_string();
        }
        if self.no_impute {
            config.impute = false;
        }
        if self.no_charts {
            config.charts = false;
        }
        if let Some(format) = self.format {
            config.chart_format = format;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(bins) = self.bins {
            config.bins = bins;
        }
        if let Some(json) = &self.json {
            config.json = Some(json.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn run_iris(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let config = arg.resolve(Some("species"))?;
    let table = dataset::iris()?;
    analyze(table, &config, "iris")
}

pub(crate) fn run_demo(arg: &DemoArg) -> anyhow::Result<()> {
    let config = arg.analyze.resolve(Some("species"))?;
    let mut rng = StdRng::seed_from_u64(arg.seed);
    let table = dataset::synthetic_iris(&mut rng)?;
    log::info!("generated synthetic dataset with seed {}", arg.seed);
    if let Some(path) = &arg.save {
        io::write_csv(&table, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Dataset saved as '{}'", path.display());
    }
    analyze(table, &config, "demo")
}

pub(crate) fn run_csv(arg: &CsvArg) -> anyhow::Result<()> {
    let config = arg.analyze.resolve(None)?;
    let table = io::read_csv(&arg.path, &config.csv_options()?)
        .with_context(|| format!("failed to load {}", arg.path.display()))?;
    let name = arg
        .path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("csv");
    analyze(table, &config, name)
}

fn analyze(table: Table, config: &AnalysisConfig, name: &str) -> anyhow::Result<()> {
    log::info!(
        "analyzing {}: {} rows x {} columns",
        name,
        table.row_count(),
        table.column_count()
    );

    let missing = na::total_missing(&table);
    let table = if config.impute && missing > 0 {
        println!("Filling {} missing value(s)", missing);
        let (filled, report) = na::impute_with_report(&table);
        for fill in &report.fills {
            println!("  column '{}': {} filled with {}", fill.column, fill.filled, fill.value);
        }
        for column in &report.unfilled {
            println!("  column '{}': no values to fill from, left as is", column);
        }
        filled
    } else {
        if missing > 0 {
            log::info!("{} missing value(s) kept", missing);
        }
        table
    };

    let options = ReportOptions {
        group_by: config.group_by.clone(),
        top_values: config.top_values,
        ..ReportOptions::default()
    };
    let report = AnalysisReport::build(&table, &options)?;
    print!("{}", report.render_text());

    if let Some(path) = &config.json {
        io::write_json(&report, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if config.charts {
        render_charts(&table, config, name)?;
    }
    Ok(())
}

fn render_charts(table: &Table, config: &AnalysisConfig, name: &str) -> anyhow::Result<()> {
    let plan = ChartPlan::from_table(table, config.group_by.as_deref())?;
    if plan.is_empty() {
        log::info!("nothing to chart");
        return Ok(());
    }

    let settings = PlotSettings {
        title: format!("{} analysis", name),
        width: config.width,
        height: config.height,
        bins: config.bins,
        ..PlotSettings::default()
    };

    match config.chart_format.extension() {
        None => print!("{}", vis::render_ascii(&plan, &settings)),
        Some(ext) => {
            let path = chart_path(&config.output_dir, name, ext)?;
            vis::write_dashboard(&plan, &path, config.chart_format, &settings)?;
            println!("Charts saved as '{}'", path.display());
        }
    }
    Ok(())
}

fn chart_path(dir: &Path, name: &str, ext: &str) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(dir.join(format!("{}_analysis.{}", name, ext)))
}
