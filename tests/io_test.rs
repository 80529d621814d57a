mod common;

use common::{assert_close, iris, temp_csv};
use tabstats::io::{read_csv, read_csv_from_reader, write_csv, write_json, CsvOptions};
use tabstats::{stats, ColumnRole, Error, Value};

#[test]
fn test_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("iris_copy.csv");
    let table = iris();

    write_csv(&table, &path).unwrap();
    assert!(path.exists());

    let options = CsvOptions::default().with_categorical(["species"]);
    let loaded = read_csv(&path, &options).unwrap();
    assert_eq!(loaded, table);
}

#[test]
fn test_missing_cells_round_trip() {
    let file = temp_csv("age,city\n31,Salvador\n,NA\n45,\n");
    let table = read_csv(file.path(), &CsvOptions::default()).unwrap();

    assert_eq!(table.role("age").unwrap(), ColumnRole::Numeric);
    assert_eq!(table.role("city").unwrap(), ColumnRole::Categorical);
    assert_eq!(table.row(1).unwrap(), &[Value::Missing, Value::Missing]);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");
    write_csv(&table, &out).unwrap();
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "age,city\n31,Salvador\n,\n45,\n"
    );
}

#[test]
fn test_fields_are_trimmed() {
    let data = "x , label\n 1.5 , a \n2.5,b\n";
    let table = read_csv_from_reader(data.as_bytes(), &CsvOptions::default()).unwrap();
    assert_eq!(table.column_names(), vec!["x", "label"]);
    assert_eq!(table.numeric_values("x").unwrap(), vec![1.5, 2.5]);
    assert_eq!(table.text_values("label").unwrap(), vec![Some("a"), Some("b")]);
}

#[test]
fn test_all_missing_column_is_numeric() {
    let data = "a,b\n1,\n2,NA\n";
    let table = read_csv_from_reader(data.as_bytes(), &CsvOptions::default()).unwrap();
    assert_eq!(table.role("b").unwrap(), ColumnRole::Numeric);
    assert!(matches!(
        stats::summarize(&table, "b"),
        Err(Error::InsufficientData { .. })
    ));
}

#[test]
fn test_custom_na_values() {
    let options = CsvOptions {
        na_values: vec!["?".to_string()],
        ..CsvOptions::default()
    };
    let data = "v\n1\n?\nNA\n";
    let table = read_csv_from_reader(data.as_bytes(), &options).unwrap();
    // "NA" is a plain label once the defaults are replaced
    assert_eq!(table.role("v").unwrap(), ColumnRole::Categorical);
    assert_eq!(
        table.text_values("v").unwrap(),
        vec![Some("1"), None, Some("NA")]
    );
}

#[test]
fn test_ragged_file_reports_row() {
    let file = temp_csv("a,b,c\n1,2,3\n4,5,6\n7,8\n");
    let result = read_csv(file.path(), &CsvOptions::default());
    assert!(matches!(
        result,
        Err(Error::InconsistentRowLength {
            row: 3,
            expected: 3,
            found: 2
        })
    ));
}

#[test]
fn test_missing_and_empty_files() {
    assert!(matches!(
        read_csv("/nonexistent/data.csv", &CsvOptions::default()),
        Err(Error::Io(_))
    ));

    let file = temp_csv("");
    assert!(matches!(
        read_csv(file.path(), &CsvOptions::default()),
        Err(Error::EmptyData(_))
    ));
}

#[test]
fn test_header_only_file() {
    let file = temp_csv("a,b\n");
    let table = read_csv(file.path(), &CsvOptions::default()).unwrap();
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 2);
}

#[test]
fn test_semicolon_file_statistics() {
    let file = temp_csv("x;y\n1;2\n2;4\n3;7\n");
    let options = CsvOptions::default().with_delimiter(b';');
    let table = read_csv(file.path(), &options).unwrap();
    let s = stats::summarize(&table, "y").unwrap();
    assert_close(s.mean, 13.0 / 3.0, 1e-12);
}

#[test]
fn test_write_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    let summary = stats::summarize(&iris(), "petal_width").unwrap();

    write_json(&summary, &path).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed["count"], 150);
    assert_eq!(parsed["min"], 0.1);
}
