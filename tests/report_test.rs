mod common;

use common::iris;
use tabstats::report::format_head;
use tabstats::{na, AnalysisReport, Error, ReportOptions, TableBuilder};

#[test]
fn test_grouped_iris_report() {
    let table = iris();
    let options = ReportOptions::default().grouped_by("species");
    let report = AnalysisReport::build(&table, &options).unwrap();

    assert_eq!(report.rows, 150);
    assert_eq!(report.summaries.len(), 4);
    assert_eq!(report.total_missing(), 0);

    let groups = report.groups.as_ref().unwrap();
    assert_eq!(groups.group_column, "species");
    assert_eq!(groups.summaries.len(), 4);
    assert_eq!(groups.means.rows.len(), 3);

    let matrix = report.correlation.as_ref().unwrap();
    assert_eq!(matrix.pairs().len(), 6);
}

#[test]
fn test_render_text_sections() {
    let options = ReportOptions::default().grouped_by("species");
    let text = AnalysisReport::build(&iris(), &options)
        .unwrap()
        .render_text();

    assert!(text.contains("DATASET OVERVIEW"));
    assert!(text.contains("Shape: 150 rows x 5 columns"));
    assert!(text.contains("species (categorical)"));
    assert!(text.contains("DESCRIPTIVE STATISTICS"));
    assert!(text.contains("Column 'species' (3 distinct):"));
    assert!(text.contains("BY SPECIES"));
    assert!(text.contains("petal_length vs petal_width: 0.963"));
    assert!(text.contains("sepal_length vs sepal_width: -0.118"));
}

#[test]
fn test_json_matches_report() {
    let report = AnalysisReport::build(&iris(), &ReportOptions::default()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["rows"], 150);
    assert_eq!(json["columns"][4]["role"], "categorical");
    assert_eq!(json["summaries"][0][0], "sepal_length");
    assert_eq!(json["summaries"][0][1]["count"], 150);
    assert!(json["groups"].is_null());
    assert_eq!(json["correlation"]["columns"].as_array().unwrap().len(), 4);
}

#[test]
fn test_missing_values_reported() {
    let table = TableBuilder::new()
        .numeric_opt("a", vec![Some(1.0), None, Some(3.0), None])
        .categorical_opt("b", vec![Some("x"), Some("y"), None, Some("x")])
        .build()
        .unwrap();
    let report = AnalysisReport::build(&table, &ReportOptions::default()).unwrap();
    assert_eq!(report.total_missing(), 3);
    let text = report.render_text();
    assert!(text.contains("total: 3 (37.50% of cells)"));
    assert!(text.contains("  a: 2"));

    let cleaned = AnalysisReport::build(&na::impute(&table), &ReportOptions::default()).unwrap();
    assert_eq!(cleaned.total_missing(), 0);
    assert!(cleaned.render_text().contains("  none"));
}

#[test]
fn test_unknown_group_column() {
    let options = ReportOptions::default().grouped_by("colour");
    assert!(matches!(
        AnalysisReport::build(&iris(), &options),
        Err(Error::UnknownColumn(name)) if name == "colour"
    ));
}

#[test]
fn test_head_preview() {
    let head = format_head(&iris(), 2);
    let lines: Vec<&str> = head.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("sepal_length | sepal_width"));
    assert!(lines[1].contains("setosa"));
}
