mod common;

use common::{Workspace, assert_close, timestamp};
use scope_cost_report::ReportError;
use scope_cost_report::pipeline::generate_report;

const LABOR_HEADER: &str = "Employee,Date,Scope,Hours,Rate\n";
const MATERIAL_HEADER: &str = "Date,Item,Scope,Cost\n";

#[test]
fn single_scope_report_matches_hand_calculation() {
    let workspace = Workspace::new(
        &format!("{LABOR_HEADER}A,2024-01-01,roofing,10,20\n"),
        &format!("{MATERIAL_HEADER}2024-01-01,nails,roofing,50\n"),
    );

    let outcome = generate_report(&workspace.config, timestamp()).expect("report generated");

    let labor = &outcome.report.labor[0];
    assert_eq!(labor.scope, "roofing");
    assert_eq!(labor.hours, Some(10.0));
    assert_close(labor.cost, 200.0);
    assert_close(labor.cost_with_tax, 214.0);
    assert_close(labor.cost_with_overhead, 246.1);

    let material = &outcome.report.material[0];
    assert_eq!(material.hours, None);
    assert_close(material.cost, 50.0);
    assert_close(material.cost_with_tax, 53.5);
    assert_close(material.cost_with_overhead, 61.525);

    let total = &outcome.report.totals[0];
    assert_close(total.labor_cost_with_overhead, 246.1);
    assert_close(total.material_cost_with_overhead, 61.525);
    assert_close(total.total_cost, 307.625);

    assert!(outcome.warnings.is_empty());
    assert_eq!(
        workspace.output_files(),
        vec!["2024-01-31_16-45-12_detailed_summary_report_v2.xlsx"]
    );
}

#[test]
fn material_only_scope_has_zero_labor() {
    let workspace = Workspace::new(
        &format!("{LABOR_HEADER}A,2024-01-01,roofing,10,20\nB,2024-01-02,roofing,2,30\n"),
        &format!(
            "{MATERIAL_HEADER}2024-01-01,nails,roofing,50\n2024-01-03,paint,painting,40\n2024-01-04,rollers,painting,10\n"
        ),
    );

    let outcome = generate_report(&workspace.config, timestamp()).expect("report generated");

    let scopes: Vec<_> = outcome
        .report
        .totals
        .iter()
        .map(|row| row.scope.as_str())
        .collect();
    assert_eq!(scopes, vec!["painting", "roofing"]);

    let painting = &outcome.report.totals[0];
    assert_eq!(painting.labor_cost_with_overhead, 0.0);
    assert_close(painting.material_cost_with_overhead, 50.0 * 1.07 * 1.15);
    assert_close(painting.total_cost, painting.material_cost_with_overhead);

    assert_eq!(outcome.report.labor[0].hours, Some(12.0));
}

#[test]
fn missing_rate_column_aborts_without_output() {
    let workspace = Workspace::new(
        "Employee,Date,Scope,Hours\nA,2024-01-01,roofing,10\n",
        &format!("{MATERIAL_HEADER}2024-01-01,nails,roofing,50\n"),
    );

    match generate_report(&workspace.config, timestamp()) {
        Err(ReportError::Schema {
            column,
            source_file,
        }) => {
            assert_eq!(column, "Rate");
            assert_eq!(source_file, workspace.config.labor_path());
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(workspace.output_files().is_empty());
}

#[test]
fn missing_material_file_is_reported() {
    let workspace = Workspace::new(
        &format!("{LABOR_HEADER}A,2024-01-01,roofing,10,20\n"),
        MATERIAL_HEADER,
    );
    std::fs::remove_file(workspace.config.material_path()).expect("material csv removed");

    match generate_report(&workspace.config, timestamp()) {
        Err(ReportError::InputNotFound(path)) => {
            assert_eq!(path, workspace.config.material_path());
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(workspace.output_files().is_empty());
}

#[test]
fn non_numeric_cost_aborts_without_output() {
    let workspace = Workspace::new(
        &format!("{LABOR_HEADER}A,2024-01-01,roofing,10,20\n"),
        &format!("{MATERIAL_HEADER}2024-01-01,nails,roofing,fifty\n"),
    );

    match generate_report(&workspace.config, timestamp()) {
        Err(ReportError::InvalidValue {
            row, column, value, ..
        }) => {
            assert_eq!(row, 1);
            assert_eq!(column, "Cost");
            assert_eq!(value, "fifty");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(workspace.output_files().is_empty());
}

#[test]
fn existing_report_is_not_overwritten() {
    let workspace = Workspace::new(
        &format!("{LABOR_HEADER}A,2024-01-01,roofing,10,20\n"),
        MATERIAL_HEADER,
    );

    let first = generate_report(&workspace.config, timestamp()).expect("first report");

    match generate_report(&workspace.config, timestamp()) {
        Err(ReportError::OutputExists(path)) => assert_eq!(path, first.path),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn empty_material_table_still_produces_all_sheets() {
    let workspace = Workspace::new(
        &format!("{LABOR_HEADER}A,2024-01-01,roofing,10,20\n"),
        MATERIAL_HEADER,
    );

    let outcome = generate_report(&workspace.config, timestamp()).expect("report generated");

    assert!(outcome.report.material.is_empty());
    assert_eq!(outcome.report.totals.len(), 1);
    assert_eq!(outcome.report.totals[0].material_cost_with_overhead, 0.0);
}

#[test]
fn invalid_rate_is_rejected_before_reading_inputs() {
    let mut workspace = Workspace::new(LABOR_HEADER, MATERIAL_HEADER);
    workspace.config.tax_rate = f64::NAN;
    workspace.config.input_dir = workspace.dir.path().join("does-not-exist");

    assert!(matches!(
        generate_report(&workspace.config, timestamp()),
        Err(ReportError::InvalidConfig(_))
    ));
}

#[test]
fn scopes_differing_in_whitespace_stay_separate() {
    let workspace = Workspace::new(
        &format!("{LABOR_HEADER}A,2024-01-01,roofing,10,20\nB,2024-01-02, roofing,5,20\n"),
        &format!("{MATERIAL_HEADER}2024-01-01,nails,roofing,50\n"),
    );

    let outcome = generate_report(&workspace.config, timestamp()).expect("report generated");

    let labor_scopes: Vec<_> = outcome
        .report
        .labor
        .iter()
        .map(|row| row.scope.as_str())
        .collect();
    assert_eq!(labor_scopes, vec![" roofing", "roofing"]);

    let totals: Vec<_> = outcome
        .report
        .totals
        .iter()
        .map(|row| row.scope.as_str())
        .collect();
    assert_eq!(totals, vec![" roofing", "roofing"]);
    assert_eq!(outcome.report.totals[0].material_cost_with_overhead, 0.0);
}

#[test]
fn overflowing_labor_cost_aborts_with_row_details() {
    let workspace = Workspace::new(
        &format!("{LABOR_HEADER}A,2024-01-01,roofing,1e200,1e200\n"),
        MATERIAL_HEADER,
    );

    match generate_report(&workspace.config, timestamp()) {
        Err(ReportError::InvalidValue {
            source_file,
            row,
            column,
            ..
        }) => {
            assert_eq!(source_file, workspace.config.labor_path());
            assert_eq!(row, 1);
            assert_eq!(column, "Cost");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(workspace.output_files().is_empty());
}
