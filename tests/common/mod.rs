//! Shared helpers for the integration tests
#![allow(dead_code)]

use std::io::Write;

use tabstats::{dataset, Table, TableBuilder};
use tempfile::NamedTempFile;

pub const TOLERANCE: f64 = 1e-10;

/// Asserts `|actual - expected| < tol` with a readable message
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {} to be within {} of {}",
        actual,
        tol,
        expected
    );
}

pub fn iris() -> Table {
    dataset::iris().expect("bundled iris dataset")
}

/// Ten values with mean 6.2, median 5.0 and sample std ~3.19
pub fn ten_values() -> Table {
    TableBuilder::new()
        .numeric("x", vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0, 10.0, 12.0])
        .build()
        .unwrap()
}

/// Writes `contents` to a temporary file that lives as long as the handle
pub fn temp_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
