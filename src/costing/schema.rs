use crate::costing::error::{ReportError, Result};
use crate::costing::io::csv_read::RawTable;

pub const EMPLOYEE: &str = "Employee";
pub const DATE: &str = "Date";
pub const SCOPE: &str = "Scope";
pub const HOURS: &str = "Hours";
pub const RATE: &str = "Rate";
pub const ITEM: &str = "Item";
pub const COST: &str = "Cost";

// Derived columns written to the report sheets.
pub const COST_WITH_TAX: &str = "Cost_with_tax";
pub const COST_WITH_OVERHEAD: &str = "Cost_with_overhead";
pub const LABOR_COST_WITH_OVERHEAD: &str = "Labor_Cost_with_Overhead";
pub const MATERIAL_COST_WITH_OVERHEAD: &str = "Material_Cost_with_Overhead";
pub const TOTAL_COST: &str = "Total_Cost";

/// Columns every labor-hours table must carry.
pub const LABOR_COLUMNS: [&str; 5] = [EMPLOYEE, DATE, SCOPE, HOURS, RATE];
/// Columns every material-purchases table must carry.
pub const MATERIAL_COLUMNS: [&str; 4] = [DATE, ITEM, SCOPE, COST];

/// Positions of the required columns inside a validated table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    columns: Vec<(&'static str, usize)>,
}

impl ColumnIndex {
    /// Position of a column that was part of the required list.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, index)| *index)
    }
}

/// Confirms that every required column is present, failing on the first one
/// that is not. Extra columns are allowed.
pub fn require_columns(table: &RawTable, required: &[&'static str]) -> Result<ColumnIndex> {
    let mut columns = Vec::with_capacity(required.len());
    for &name in required {
        let index = table.column(name).ok_or_else(|| ReportError::Schema {
            column: name.to_string(),
            source_file: table.source.clone(),
        })?;
        columns.push((name, index));
    }
    Ok(ColumnIndex { columns })
}
