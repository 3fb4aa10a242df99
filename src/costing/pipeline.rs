use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info, instrument};

use crate::costing::aggregate::{ensure_finite, merge_totals, summarize_labor, summarize_material};
use crate::costing::calculate::{Rates, cost_labor, cost_material, parse_labor, parse_material};
use crate::costing::config::ReportConfig;
use crate::costing::error::{FormattingWarning, ReportError, Result};
use crate::costing::flatten::{WorkbookData, build_workbook};
use crate::costing::io::csv_read::{self, RawTable};
use crate::costing::io::{excel_read, excel_write};
use crate::costing::model::Report;
use crate::costing::schema::{LABOR_COLUMNS, MATERIAL_COLUMNS, require_columns};

/// Suffix shared by every generated report file name.
pub const REPORT_SUFFIX: &str = "detailed_summary_report_v2.xlsx";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Result of a successful report run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub path: PathBuf,
    pub report: Report,
    /// Cells skipped while styling; the report was saved regardless.
    pub warnings: Vec<FormattingWarning>,
}

/// File name of a report generated at `timestamp`.
pub fn report_file_name(timestamp: NaiveDateTime) -> String {
    format!("{}_{REPORT_SUFFIX}", timestamp.format(TIMESTAMP_FORMAT))
}

/// Validates both tables, derives costs and aggregates them by scope.
///
/// Both schemas are checked before any row is typed, so a missing column is
/// reported even when the other table holds bad values.
pub fn build_report(labor: &RawTable, material: &RawTable, rates: &Rates) -> Result<Report> {
    let labor_columns = require_columns(labor, &LABOR_COLUMNS)?;
    let material_columns = require_columns(material, &MATERIAL_COLUMNS)?;

    let labor_costs = cost_labor(parse_labor(labor, &labor_columns)?, rates, &labor.source)?;
    let material_costs = cost_material(
        parse_material(material, &material_columns)?,
        rates,
        &material.source,
    )?;
    debug!(
        labor_rows = labor_costs.len(),
        material_rows = material_costs.len(),
        "derived cost columns"
    );

    let labor_summary = summarize_labor(&labor_costs);
    let material_summary = summarize_material(&material_costs);
    let totals = merge_totals(&labor_summary, &material_summary);

    let report = Report {
        labor: labor_summary,
        material: material_summary,
        totals,
    };
    ensure_finite(&report)?;
    Ok(report)
}

/// Runs the whole pipeline and writes the report into the configured output
/// directory. Nothing is written unless every fatal check has passed.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %config.input_dir.display(), output = %config.output_dir.display())
)]
pub fn generate_report(config: &ReportConfig, timestamp: NaiveDateTime) -> Result<ReportOutcome> {
    config.validate()?;

    let labor = csv_read::read_table(&config.labor_path())?;
    let material = csv_read::read_table(&config.material_path())?;
    info!(
        labor_rows = labor.rows.len(),
        material_rows = material.rows.len(),
        "loaded input tables"
    );

    let report = build_report(&labor, &material, &Rates::from(config))?;
    info!(scope_count = report.totals.len(), "aggregated costs by scope");

    let path = config.output_dir.join(report_file_name(timestamp));
    if path.exists() {
        return Err(ReportError::OutputExists(path));
    }
    fs::create_dir_all(&config.output_dir)?;

    let workbook = build_workbook(&report);
    let warnings = excel_write::write_workbook(&path, &workbook)?;
    info!(path = %path.display(), warning_count = warnings.len(), "report written");

    Ok(ReportOutcome {
        path,
        report,
        warnings,
    })
}

/// Reads a previously generated report.
#[instrument(level = "info", skip_all, fields(input = %path.display()))]
pub fn inspect_report(path: &Path) -> Result<WorkbookData> {
    let workbook = excel_read::read_report(path)?;
    debug!(sheet_count = workbook.tables.len(), "report read");
    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn file_name_embeds_timestamp() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|date| date.and_hms_opt(7, 5, 0))
            .expect("valid timestamp");

        assert_eq!(
            report_file_name(timestamp),
            "2024-03-09_07-05-00_detailed_summary_report_v2.xlsx"
        );
    }
}
