use crate::costing::model::{Report, ScopeSummary, TotalCostRow};
use crate::costing::schema::{
    self, COST_WITH_OVERHEAD, COST_WITH_TAX, LABOR_COST_WITH_OVERHEAD,
    MATERIAL_COST_WITH_OVERHEAD, TOTAL_COST,
};

/// Sheet holding the per-scope labor sums.
pub const LABOR_SHEET: &str = "Labor Summary";
/// Sheet holding the per-scope material sums.
pub const MATERIAL_SHEET: &str = "Material Summary";
/// Sheet holding the merged overhead-inclusive costs.
pub const TOTALS_SHEET: &str = "Total Costs by Scope";
/// Every sheet of a report, in workbook order.
pub const REPORT_SHEETS: [&str; 3] = [LABOR_SHEET, MATERIAL_SHEET, TOTALS_SHEET];

/// A single cell of a sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// The text a reader sees before any number format is applied.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Text(value) => value.clone(),
            CellValue::Number(value) => value.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetTable {
    /// Cells of the named column, skipping the header.
    pub fn column_values(&self, name: &str) -> Option<Vec<&CellValue>> {
        let index = self.columns.iter().position(|column| column == name)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }
}

/// Represents all tables required to materialise the Excel workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookData {
    pub tables: Vec<SheetTable>,
}

impl WorkbookData {
    pub fn sheet(&self, name: &str) -> Option<&SheetTable> {
        self.tables.iter().find(|table| table.sheet_name == name)
    }
}

/// Lays the report out as the three sheets of the output workbook.
pub fn build_workbook(report: &Report) -> WorkbookData {
    WorkbookData {
        tables: vec![
            summary_table(LABOR_SHEET, &report.labor, true),
            summary_table(MATERIAL_SHEET, &report.material, false),
            totals_table(&report.totals),
        ],
    }
}

fn summary_table(sheet_name: &str, summaries: &[ScopeSummary], with_hours: bool) -> SheetTable {
    let mut columns = vec![schema::SCOPE];
    if with_hours {
        columns.push(schema::HOURS);
    }
    columns.extend([schema::COST, COST_WITH_TAX, COST_WITH_OVERHEAD]);

    let rows = summaries
        .iter()
        .map(|summary| {
            let mut cells = vec![CellValue::Text(summary.scope.clone())];
            if with_hours {
                cells.push(CellValue::Number(summary.hours.unwrap_or_default()));
            }
            cells.extend([
                CellValue::Number(summary.cost),
                CellValue::Number(summary.cost_with_tax),
                CellValue::Number(summary.cost_with_overhead),
            ]);
            cells
        })
        .collect();

    SheetTable {
        sheet_name: sheet_name.to_string(),
        columns: columns.into_iter().map(str::to_string).collect(),
        rows,
    }
}

fn totals_table(totals: &[TotalCostRow]) -> SheetTable {
    let rows = totals
        .iter()
        .map(|row| {
            vec![
                CellValue::Text(row.scope.clone()),
                CellValue::Number(row.labor_cost_with_overhead),
                CellValue::Number(row.material_cost_with_overhead),
                CellValue::Number(row.total_cost),
            ]
        })
        .collect();

    SheetTable {
        sheet_name: TOTALS_SHEET.to_string(),
        columns: [
            schema::SCOPE,
            LABOR_COST_WITH_OVERHEAD,
            MATERIAL_COST_WITH_OVERHEAD,
            TOTAL_COST,
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
        rows,
    }
}
