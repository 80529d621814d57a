//! Analysis settings loaded from TOML
//!
//! Every key is optional; a missing key keeps its default. Command-line
//! flags are applied on top of the loaded values by the binary.
//!
//! ```
//! use tabstats::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::from_toml_str("group_by = \"species\"\nbins = 12").unwrap();
//! assert_eq!(config.group_by.as_deref(), Some("species"));
//! assert_eq!(config.bins, 12);
//! assert!(config.impute);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::io::csv::DEFAULT_NA_VALUES;
use crate::io::CsvOptions;
use crate::vis::OutputFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Field separator, a single ASCII character
    pub delimiter: String,
    pub has_header: bool,
    /// Columns read as categorical regardless of content
    pub categorical: Vec<String>,
    /// Field values read as missing
    pub na_values: Vec<String>,
    /// Categorical column used for grouped summaries
    pub group_by: Option<String>,
    /// Fill missing values before analysis
    pub impute: bool,
    /// Value-count rows shown per categorical column
    pub top_values: usize,
    pub charts: bool,
    pub chart_format: OutputFormat,
    pub output_dir: PathBuf,
    /// Histogram bins
    pub bins: usize,
    pub width: u32,
    pub height: u32,
    /// Write the JSON report to this file
    pub json: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            delimiter: ",".to_string(),
            has_header: true,
            categorical: Vec::new(),
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            group_by: None,
            impute: true,
            top_values: 10,
            charts: true,
            chart_format: OutputFormat::Ascii,
            output_dir: PathBuf::from("."),
            bins: 20,
            width: 1500,
            height: 1000,
            json: None,
        }
    }
}

impl AnalysisConfig {
    /// Reads and validates a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        if self.bins == 0 {
            return Err(Error::InvalidInput("bins must be at least 1".into()));
        }
        if self.width < 100 || self.height < 100 {
            return Err(Error::InvalidInput(format!(
                "image size {}x{} is below 100x100",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// The delimiter as a byte, or `InvalidInput` unless it is one ASCII char
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(Error::InvalidInput(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ))),
        }
    }

    /// Reader options derived from these settings
    pub fn csv_options(&self) -> Result<CsvOptions> {
        Ok(CsvOptions {
            delimiter: self.delimiter_byte()?,
            has_header: self.has_header,
            categorical: self.categorical.clone(),
            na_values: self.na_values.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.csv_options().unwrap(), CsvOptions::default());
    }

    #[test]
    fn test_full_file() {
        let text = r#"
            delimiter = ";"
            has_header = false
            categorical = ["code"]
            group_by = "code"
            impute = false
            chart_format = "svg"
            output_dir = "out"
            json = "report.json"
        "#;
        let config = AnalysisConfig::from_toml_str(text).unwrap();
        assert_eq!(config.chart_format, OutputFormat::Svg);
        assert_eq!(config.json, Some(PathBuf::from("report.json")));

        let options = config.csv_options().unwrap();
        assert_eq!(options.delimiter, b';');
        assert!(!options.has_header);
        assert_eq!(options.categorical, vec!["code".to_string()]);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            AnalysisConfig::from_toml_str("bins = 0"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("delimiter = \"::\""),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("width = 20"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            AnalysisConfig::from_toml_str("colour = true"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            AnalysisConfig::load("/nonexistent/tabstats.toml"),
            Err(Error::Io(_))
        ));
    }
}
