use clap::{Parser, Subcommand};
use log::LevelFilter;

use self::analyze::{AnalyzeArg, CsvArg, DemoArg};
use self::sample::SampleArg;

mod analyze;
mod sample;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Log warnings and errors only
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Analyze the bundled iris dataset, grouped by species
    Iris(#[clap(flatten)] AnalyzeArg),
    /// Analyze a seeded synthetic iris-like dataset
    Demo(#[clap(flatten)] DemoArg),
    /// Analyze a delimited text file
    Csv(#[clap(flatten)] CsvArg),
    /// Write the synthetic people dataset to a CSV file
    Sample(#[clap(flatten)] SampleArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(&args);

    match args.mode {
        Mode::Iris(arg) => analyze::run_iris(&arg)?,
        Mode::Demo(arg) => analyze::run_demo(&arg)?,
        Mode::Csv(arg) => analyze::run_csv(&arg)?,
        Mode::Sample(arg) => sample::run(&arg)?,
    }
    Ok(())
}

fn init_logging(args: &CommandArgs) {
    let level = if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
