use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, Writer, WriterBuilder};

use crate::error::{Error, Result};
use crate::table::{ColumnRole, ColumnSpec, Table, Value};

/// Markers read as a missing cell, besides the empty field
pub const DEFAULT_NA_VALUES: &[&str] = &["NA", "NaN", "nan", "null", "N/A"];

/// Options for reading delimited text
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    /// Field separator
    pub delimiter: u8,
    /// First record holds column names
    pub has_header: bool,
    /// Columns that are categorical regardless of content
    pub categorical: Vec<String>,
    /// Field values treated as missing
    pub na_values: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            has_header: true,
            categorical: Vec::new(),
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.has_header = false;
        self
    }

    pub fn with_categorical<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical.extend(columns.into_iter().map(Into::into));
        self
    }

    fn is_missing(&self, field: &str) -> bool {
        field.is_empty() || self.na_values.iter().any(|na| na == field)
    }
}

/// Reads a delimited text file into a [`Table`]
pub fn read_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_csv_from_reader(file, options)?;
    log::info!(
        "loaded {}: {} rows x {} columns",
        path.display(),
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Reads delimited text from any reader into a [`Table`].
///
/// A column is numeric when every present field parses as a number, unless
/// it is listed in [`CsvOptions::categorical`]. Row numbers in errors count
/// data records from 1.
pub fn read_csv_from_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = rdr.records();
    let first = match records.next() {
        Some(record) => record?,
        None => return Err(Error::EmptyData("input has no header or records".into())),
    };

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    let headers: Vec<String> = if options.has_header {
        first.iter().map(|h| h.to_string()).collect()
    } else {
        let names = (0..first.len()).map(|i| format!("column_{}", i)).collect();
        raw_rows.push(fields(&first));
        names
    };

    for record in records {
        let record = record?;
        if record.len() != headers.len() {
            return Err(Error::InconsistentRowLength {
                row: raw_rows.len() + 1,
                expected: headers.len(),
                found: record.len(),
            });
        }
        raw_rows.push(fields(&record));
    }

    for name in &options.categorical {
        if !headers.contains(name) {
            log::warn!("categorical column '{}' not present in input", name);
        }
    }

    let specs: Vec<ColumnSpec> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| ColumnSpec::new(name.clone(), infer_role(name, idx, &raw_rows, options)))
        .collect();

    let rows = raw_rows
        .into_iter()
        .enumerate()
        .map(|(row_idx, raw)| {
            raw.into_iter()
                .zip(&specs)
                .map(|(field, spec)| parse_cell(field, spec, row_idx + 1, options))
                .collect::<Result<Vec<Value>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Table::new(specs, rows)
}

fn fields(record: &StringRecord) -> Vec<String> {
    record.iter().map(|f| f.to_string()).collect()
}

fn infer_role(name: &str, idx: usize, rows: &[Vec<String>], options: &CsvOptions) -> ColumnRole {
    if options.categorical.iter().any(|c| c == name) {
        return ColumnRole::Categorical;
    }
    let all_numeric = rows
        .iter()
        .map(|row| row[idx].as_str())
        .filter(|field| !options.is_missing(field))
        .all(|field| field.parse::<f64>().is_ok());
    if all_numeric {
        ColumnRole::Numeric
    } else {
        ColumnRole::Categorical
    }
}

fn parse_cell(field: String, spec: &ColumnSpec, row: usize, options: &CsvOptions) -> Result<Value> {
    if options.is_missing(&field) {
        return Ok(Value::Missing);
    }
    match spec.role {
        ColumnRole::Numeric => field
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|e| Error::InvalidCell {
                column: spec.name.clone(),
                row,
                message: format!("'{}': {}", field, e),
            }),
        ColumnRole::Categorical => Ok(Value::Text(field)),
    }
}

/// Writes a [`Table`] as comma-separated text with a header row
pub fn write_csv<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv_to_writer(table, file)?;
    log::info!("wrote {} rows to {}", table.row_count(), path.as_ref().display());
    Ok(())
}

/// Writes a [`Table`] to any writer; missing cells become empty fields
pub fn write_csv_to_writer<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut wtr: Writer<W> = WriterBuilder::new().from_writer(writer);

    wtr.write_record(table.column_names())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(|cell| cell.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infers_roles() {
        let data = "a,b,c\n1,x,\n2.5,y,3\n";
        let table = read_csv_from_reader(data.as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(table.role("a").unwrap(), ColumnRole::Numeric);
        assert_eq!(table.role("b").unwrap(), ColumnRole::Categorical);
        assert_eq!(table.role("c").unwrap(), ColumnRole::Numeric);
        assert_eq!(table.row(0).unwrap()[2], Value::Missing);
    }

    #[test]
    fn test_na_markers() {
        let data = "a,b\nNA,x\n1,null\n";
        let table = read_csv_from_reader(data.as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(table.numeric_values("a").unwrap(), vec![1.0]);
        assert_eq!(table.text_values("b").unwrap(), vec![Some("x"), None]);
    }

    #[test]
    fn test_forced_categorical() {
        let data = "code,v\n1,2\n3,4\n";
        let options = CsvOptions::default().with_categorical(["code"]);
        let table = read_csv_from_reader(data.as_bytes(), &options).unwrap();
        assert_eq!(table.role("code").unwrap(), ColumnRole::Categorical);
        assert_eq!(table.text_values("code").unwrap(), vec![Some("1"), Some("3")]);
    }

    #[test]
    fn test_without_header() {
        let data = "1;a\n2;b\n";
        let options = CsvOptions::default().with_delimiter(b';').without_header();
        let table = read_csv_from_reader(data.as_bytes(), &options).unwrap();
        assert_eq!(table.column_names(), vec!["column_0", "column_1"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_ragged_row() {
        let data = "a,b\n1,2\n3\n";
        let result = read_csv_from_reader(data.as_bytes(), &CsvOptions::default());
        assert!(matches!(
            result,
            Err(Error::InconsistentRowLength {
                row: 2,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_empty_input() {
        let result = read_csv_from_reader("".as_bytes(), &CsvOptions::default());
        assert!(matches!(result, Err(Error::EmptyData(_))));
    }

    #[test]
    fn test_write_to_writer() {
        let data = "a,b\n1,x\n,y\n";
        let table = read_csv_from_reader(data.as_bytes(), &CsvOptions::default()).unwrap();
        let mut out = Vec::new();
        write_csv_to_writer(&table, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,b\n1,x\n,y\n");
    }
}
