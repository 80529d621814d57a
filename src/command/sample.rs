use std::path::PathBuf;

use anyhow::Context as _;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tabstats::{dataset, io, na};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SampleArg {
    /// Number of rows to generate
    #[arg(long, default_value_t = 100)]
    rows: usize,
    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Output file path
    path: PathBuf,
}

pub(crate) fn run(arg: &SampleArg) -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(arg.seed);
    let table = dataset::synthetic_people(&mut rng, arg.rows)?;

    io::write_csv(&table, &arg.path)
        .with_context(|| format!("failed to write {}", arg.path.display()))?;

    println!(
        "Sample dataset saved as '{}' ({} rows, {} missing cells)",
        arg.path.display(),
        table.row_count(),
        na::total_missing(&table)
    );
    Ok(())
}
