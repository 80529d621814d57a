mod common;

use common::{assert_close, iris, ten_values, TOLERANCE};
use tabstats::stats::{self, covariance, pearson, value_counts};
use tabstats::{ColumnRole, Error, TableBuilder};

#[test]
fn test_summarize_basic() {
    let table = TableBuilder::new()
        .numeric("x", vec![1.0, 2.0, 3.0, 4.0, 5.0])
        .build()
        .unwrap();
    let s = stats::summarize(&table, "x").unwrap();

    assert_eq!(s.count, 5);
    assert_close(s.mean, 3.0, TOLERANCE);
    assert_close(s.median, 3.0, TOLERANCE);
    assert_close(s.std.unwrap(), 1.5811388300841898, 1e-9);
    assert_eq!(s.min, 1.0);
    assert_eq!(s.max, 5.0);
}

#[test]
fn test_even_count_median() {
    let table = TableBuilder::new()
        .numeric("x", vec![1.0, 2.0, 3.0, 4.0])
        .build()
        .unwrap();
    assert_close(stats::summarize(&table, "x").unwrap().median, 2.5, TOLERANCE);
}

#[test]
fn test_ten_value_example() {
    let s = stats::summarize(&ten_values(), "x").unwrap();
    assert_eq!(s.count, 10);
    assert_close(s.mean, 6.2, TOLERANCE);
    assert_close(s.median, 5.0, TOLERANCE);
    assert_close(s.std.unwrap(), 3.190262963734773, 1e-7);
    assert_close(s.q1, 4.0, TOLERANCE);
    assert_close(s.q3, 8.5, TOLERANCE);
}

#[test]
fn test_single_value_has_no_std() {
    let table = TableBuilder::new()
        .numeric_opt("x", vec![None, Some(4.0), None])
        .build()
        .unwrap();
    let s = stats::summarize(&table, "x").unwrap();
    assert_eq!(s.count, 1);
    assert_eq!(s.std, None);
    assert_eq!(s.min, 4.0);
    assert_eq!(s.max, 4.0);
}

#[test]
fn test_summarize_errors() {
    let table = TableBuilder::new()
        .numeric_opt("empty", vec![None, None])
        .categorical("label", vec!["a", "b"])
        .build()
        .unwrap();

    assert!(matches!(
        stats::summarize(&table, "empty"),
        Err(Error::InsufficientData {
            required: 1,
            actual: 0,
            ..
        })
    ));
    assert!(matches!(
        stats::summarize(&table, "nope"),
        Err(Error::UnknownColumn(name)) if name == "nope"
    ));
    assert!(matches!(
        stats::summarize(&table, "label"),
        Err(Error::ColumnRoleMismatch {
            expected: ColumnRole::Numeric,
            found: ColumnRole::Categorical,
            ..
        })
    ));
}

#[test]
fn test_summarize_iris_columns() {
    let table = iris();
    let expected = [
        ("sepal_length", 5.843333333, 5.8, 0.828066128, 4.3, 7.9),
        ("sepal_width", 3.057333333, 3.0, 0.435866285, 2.0, 4.4),
        ("petal_length", 3.758, 4.35, 1.765298233, 1.0, 6.9),
        ("petal_width", 1.199333333, 1.3, 0.762237669, 0.1, 2.5),
    ];
    for (column, mean, median, std, min, max) in expected {
        let s = stats::summarize(&table, column).unwrap();
        assert_eq!(s.count, 150);
        assert_close(s.mean, mean, 1e-6);
        assert_close(s.median, median, 1e-9);
        assert_close(s.std.unwrap(), std, 1e-6);
        assert_close(s.min, min, 1e-12);
        assert_close(s.max, max, 1e-12);
    }
}

#[test]
fn test_summarize_all_in_column_order() {
    let all = stats::summarize_all(&iris()).unwrap();
    let names: Vec<&str> = all.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["sepal_length", "sepal_width", "petal_length", "petal_width"]
    );
}

#[test]
fn test_correlate_self_is_exactly_one() {
    let table = iris();
    for column in table.numeric_columns() {
        assert_eq!(stats::correlate(&table, column, column).unwrap(), 1.0);
    }

    let constant = TableBuilder::new()
        .numeric("c", vec![2.0, 2.0, 2.0])
        .build()
        .unwrap();
    assert_eq!(stats::correlate(&constant, "c", "c").unwrap(), 1.0);
}

#[test]
fn test_pearson_self_close_to_one() {
    let x = [0.3, 1.7, 2.2, 9.1, 4.4, 5.0];
    assert_close(pearson(&x, &x).unwrap(), 1.0, 1e-9);
}

#[test]
fn test_pearson_length_mismatch() {
    assert!(matches!(
        pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
        Err(Error::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn test_constant_column_correlates_to_zero() {
    let table = TableBuilder::new()
        .numeric("x", vec![1.0, 2.0, 3.0, 4.0])
        .numeric("c", vec![5.0, 5.0, 5.0, 5.0])
        .build()
        .unwrap();
    assert_eq!(stats::correlate(&table, "x", "c").unwrap(), 0.0);
    assert_eq!(stats::correlate(&table, "c", "x").unwrap(), 0.0);
}

#[test]
fn test_constant_decimal_columns_correlate_to_zero() {
    for (c, n) in [(0.1, 10), (5.1, 150), (2.3, 7), (0.7, 50)] {
        let table = TableBuilder::new()
            .numeric("x", (0..n).map(|i| i as f64 * 1.3 + (i % 3) as f64))
            .numeric("c", vec![c; n])
            .build()
            .unwrap();
        assert_eq!(stats::correlate(&table, "x", "c").unwrap(), 0.0, "c={} n={}", c, n);
        assert_eq!(stats::correlate(&table, "c", "x").unwrap(), 0.0, "c={} n={}", c, n);
    }
}

#[test]
fn test_constant_decimal_column_has_zero_std() {
    let table = TableBuilder::new()
        .numeric("c", vec![5.1; 150])
        .build()
        .unwrap();
    let s = stats::summarize(&table, "c").unwrap();
    assert_eq!(s.mean, 5.1);
    assert_eq!(s.std, Some(0.0));
    assert_eq!(s.median, 5.1);
}

#[test]
fn test_correlate_iris_pairs() {
    let table = iris();
    let expected = [
        ("sepal_length", "sepal_width", -0.11756978),
        ("sepal_length", "petal_length", 0.87175378),
        ("sepal_length", "petal_width", 0.81794113),
        ("sepal_width", "petal_length", -0.42844010),
        ("sepal_width", "petal_width", -0.36612593),
        ("petal_length", "petal_width", 0.96286543),
    ];
    for (a, b, r) in expected {
        assert_close(stats::correlate(&table, a, b).unwrap(), r, 1e-6);
        assert_eq!(
            stats::correlate(&table, a, b).unwrap(),
            stats::correlate(&table, b, a).unwrap()
        );
    }
}

#[test]
fn test_correlate_skips_incomplete_rows() {
    let table = TableBuilder::new()
        .numeric_opt("x", vec![Some(1.0), Some(2.0), None, Some(4.0), Some(100.0)])
        .numeric_opt("y", vec![Some(2.0), Some(4.0), Some(50.0), Some(8.0), None])
        .build()
        .unwrap();
    assert_close(stats::correlate(&table, "x", "y").unwrap(), 1.0, 1e-12);
}

#[test]
fn test_correlate_without_complete_rows() {
    let table = TableBuilder::new()
        .numeric_opt("x", vec![Some(1.0), None])
        .numeric_opt("y", vec![None, Some(2.0)])
        .build()
        .unwrap();
    assert!(matches!(
        stats::correlate(&table, "x", "y"),
        Err(Error::InsufficientData { actual: 0, .. })
    ));
}

#[test]
fn test_correlation_matrix_iris() {
    let table = iris();
    let columns = table.numeric_columns();
    let matrix = stats::correlation_matrix(&table, &columns).unwrap();

    assert_eq!(matrix.len(), 4);
    for (i, row) in matrix.values().iter().enumerate() {
        assert_eq!(row[i], 1.0);
        for (j, &r) in row.iter().enumerate() {
            assert_eq!(r, matrix.values()[j][i]);
            assert!((-1.0..=1.0).contains(&r));
        }
    }
    assert_close(
        matrix.get("petal_width", "petal_length").unwrap(),
        0.96286543,
        1e-6,
    );
}

#[test]
fn test_correlation_matrix_validates_first() {
    let table = iris();
    assert!(matches!(
        stats::correlation_matrix(&table, &["sepal_length", "species"]),
        Err(Error::ColumnRoleMismatch { .. })
    ));
    assert!(matches!(
        stats::correlation_matrix(&table, &["sepal_length", "missing"]),
        Err(Error::UnknownColumn(_))
    ));
    assert!(matches!(
        stats::correlation_matrix(&table, &["petal_width", "petal_width"]),
        Err(Error::DuplicateColumnName(_))
    ));
}

#[test]
fn test_covariance_and_counts() {
    let table = iris();
    let cov = covariance(&table, "petal_length", "petal_width").unwrap();
    assert!(cov > 0.0);

    let counts = value_counts(&table, "species").unwrap();
    assert_eq!(
        counts,
        vec![
            ("setosa".to_string(), 50),
            ("versicolor".to_string(), 50),
            ("virginica".to_string(), 50)
        ]
    );
}
