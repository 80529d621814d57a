mod common;

use common::{assert_close, iris};
use tabstats::stats::{self, group_means};
use tabstats::{Error, TableBuilder, TableGroupBy};

#[test]
fn test_iris_three_groups_in_order() {
    let grouped = stats::summarize_by_group(&iris(), "sepal_length", "species").unwrap();

    assert_eq!(grouped.len(), 3);
    assert_eq!(grouped.keys(), vec!["setosa", "versicolor", "virginica"]);
    for (_, s) in grouped.iter() {
        assert_eq!(s.count, 50);
    }
    assert_eq!(grouped.column, "sepal_length");
    assert_eq!(grouped.group_column, "species");
}

#[test]
fn test_iris_group_means() {
    let table = iris();
    let columns = ["sepal_length", "sepal_width", "petal_length", "petal_width"];
    let means = group_means(&table, "species", &columns).unwrap();

    let expected = [
        ("setosa", [5.006, 3.428, 1.462, 0.246]),
        ("versicolor", [5.936, 2.77, 4.26, 1.326]),
        ("virginica", [6.588, 2.974, 5.552, 2.026]),
    ];
    for (key, values) in expected {
        for (column, value) in columns.iter().zip(values) {
            assert_close(means.get(key, column).unwrap(), value, 1e-9);
        }
    }

    let petal = stats::summarize_by_group(&table, "petal_length", "species").unwrap();
    assert_close(petal.get("versicolor").unwrap().mean, 4.26, 1e-9);
}

#[test]
fn test_groups_follow_first_appearance() {
    let table = TableBuilder::new()
        .numeric("v", vec![1.0, 2.0, 3.0, 4.0])
        .categorical("k", vec!["z", "a", "z", "m"])
        .build()
        .unwrap();
    let grouped = stats::summarize_by_group(&table, "v", "k").unwrap();
    assert_eq!(grouped.keys(), vec!["z", "a", "m"]);
    assert_close(grouped.get("z").unwrap().mean, 2.0, 1e-12);
    assert_eq!(grouped.get("m").unwrap().std, None);
}

#[test]
fn test_missing_labels_are_skipped() {
    let table = TableBuilder::new()
        .numeric("v", vec![1.0, 2.0, 3.0])
        .categorical_opt("k", vec![Some("a"), None, Some("a")])
        .build()
        .unwrap();
    let grouped = stats::summarize_by_group(&table, "v", "k").unwrap();
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped.get("a").unwrap().count, 2);
}

#[test]
fn test_group_with_no_values_fails() {
    let table = TableBuilder::new()
        .numeric_opt("v", vec![Some(1.0), None])
        .categorical("k", vec!["a", "b"])
        .build()
        .unwrap();
    assert!(matches!(
        stats::summarize_by_group(&table, "v", "k"),
        Err(Error::InsufficientData { .. })
    ));
}

#[test]
fn test_validation_errors() {
    let table = iris();
    assert!(matches!(
        stats::summarize_by_group(&table, "nope", "species"),
        Err(Error::UnknownColumn(name)) if name == "nope"
    ));
    assert!(matches!(
        stats::summarize_by_group(&table, "sepal_length", "nope"),
        Err(Error::UnknownColumn(name)) if name == "nope"
    ));
    assert!(matches!(
        stats::summarize_by_group(&table, "species", "species"),
        Err(Error::ColumnRoleMismatch { .. })
    ));
    assert!(matches!(
        stats::summarize_by_group(&table, "sepal_length", "petal_length"),
        Err(Error::ColumnRoleMismatch { .. })
    ));
}

#[test]
fn test_table_group_by_sizes_and_groups() {
    let table = iris();
    let grouped = TableGroupBy::new(&table, "species").unwrap();

    assert_eq!(grouped.by(), "species");
    assert_eq!(grouped.group_count(), 3);
    assert_eq!(
        grouped.size(),
        vec![
            ("setosa".to_string(), 50),
            ("versicolor".to_string(), 50),
            ("virginica".to_string(), 50)
        ]
    );

    let virginica = grouped.get_group("virginica").unwrap();
    assert_eq!(virginica.row_count(), 50);
    let s = stats::summarize(&virginica, "petal_length").unwrap();
    assert_close(s.mean, 5.552, 1e-9);
    assert!(grouped.get_group("unknown").is_none());
}
