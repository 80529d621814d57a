//! Descriptive statistics for small in-memory tables
//!
//! Load a [`Table`] from delimited text or a bundled dataset, then summarize
//! numeric columns, break them down by a categorical column and correlate
//! them with each other.
//!
//! ```
//! use tabstats::{dataset, stats};
//!
//! let iris = dataset::iris().unwrap();
//! let by_species = stats::summarize_by_group(&iris, "petal_length", "species").unwrap();
//! assert_eq!(by_species.keys(), vec!["setosa", "versicolor", "virginica"]);
//!
//! let r = stats::correlate(&iris, "petal_length", "petal_width").unwrap();
//! assert!(r > 0.9);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod groupby;
pub mod io;
pub mod na;
pub mod report;
pub mod stats;
pub mod table;
pub mod vis;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use groupby::{GroupMeans, TableGroupBy};
pub use io::{read_csv, write_csv, CsvOptions};
pub use report::{AnalysisReport, ReportOptions};
pub use stats::{
    correlate, correlation_matrix, summarize, summarize_by_group, CorrelationMatrix, GroupedStats,
    SummaryStats,
};
pub use table::{ColumnRole, ColumnSpec, Table, TableBuilder, Value};
pub use vis::{ChartKind, ChartPlan, OutputFormat, PlotSettings};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
