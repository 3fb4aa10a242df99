//! Row typing and derived cost columns.
//!
//! Markups are applied exactly once, when a record becomes a [`LaborCost`] or
//! [`MaterialCost`]; the typed records themselves never carry derived values.

use std::path::Path;

use csv::StringRecord;

use crate::costing::config::ReportConfig;
use crate::costing::error::{ReportError, Result};
use crate::costing::io::csv_read::RawTable;
use crate::costing::model::{LaborCost, LaborRecord, MaterialCost, MaterialRecord};
use crate::costing::schema::{self, ColumnIndex};

/// Multiplicative markups applied to every cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    /// Tax as a fraction, e.g. `0.07`.
    pub tax: f64,
    /// Overhead as a fraction of the tax-inclusive cost.
    pub overhead: f64,
}

impl Rates {
    pub fn with_tax(&self, cost: f64) -> f64 {
        cost * (1.0 + self.tax)
    }

    pub fn with_overhead(&self, cost_with_tax: f64) -> f64 {
        cost_with_tax * (1.0 + self.overhead)
    }
}

impl Default for Rates {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for Rates {
    fn from(config: &ReportConfig) -> Self {
        Self {
            tax: config.tax_rate,
            overhead: config.overhead_rate,
        }
    }
}

/// Types every row of a validated labor table.
pub fn parse_labor(table: &RawTable, columns: &ColumnIndex) -> Result<Vec<LaborRecord>> {
    let cells = Cells { table, columns };
    table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let row_number = index + 1;
            Ok(LaborRecord {
                employee: cells.text(row, schema::EMPLOYEE),
                date: cells.text(row, schema::DATE),
                scope: cells.scope(row, row_number)?,
                hours: cells.number(row, row_number, schema::HOURS)?,
                rate: cells.number(row, row_number, schema::RATE)?,
            })
        })
        .collect()
}

/// Types every row of a validated material table.
pub fn parse_material(table: &RawTable, columns: &ColumnIndex) -> Result<Vec<MaterialRecord>> {
    let cells = Cells { table, columns };
    table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let row_number = index + 1;
            Ok(MaterialRecord {
                date: cells.text(row, schema::DATE),
                item: cells.text(row, schema::ITEM),
                scope: cells.scope(row, row_number)?,
                cost: cells.number(row, row_number, schema::COST)?,
            })
        })
        .collect()
}

/// Derives `Cost`, `Cost_with_tax` and `Cost_with_overhead` for each labor row.
///
/// `source` names the table the records came from; records are expected in
/// table order so that overflow errors point at the right row.
pub fn cost_labor(
    records: Vec<LaborRecord>,
    rates: &Rates,
    source: &Path,
) -> Result<Vec<LaborCost>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let row = index + 1;
            let cost = finite(source, row, schema::COST, record.rate * record.hours)?;
            let cost_with_tax = finite(source, row, schema::COST_WITH_TAX, rates.with_tax(cost))?;
            let cost_with_overhead = finite(
                source,
                row,
                schema::COST_WITH_OVERHEAD,
                rates.with_overhead(cost_with_tax),
            )?;
            Ok(LaborCost {
                record,
                cost,
                cost_with_tax,
                cost_with_overhead,
            })
        })
        .collect()
}

/// Derives `Cost_with_tax` and `Cost_with_overhead` for each material row.
pub fn cost_material(
    records: Vec<MaterialRecord>,
    rates: &Rates,
    source: &Path,
) -> Result<Vec<MaterialCost>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let row = index + 1;
            let cost_with_tax =
                finite(source, row, schema::COST_WITH_TAX, rates.with_tax(record.cost))?;
            let cost_with_overhead = finite(
                source,
                row,
                schema::COST_WITH_OVERHEAD,
                rates.with_overhead(cost_with_tax),
            )?;
            Ok(MaterialCost {
                record,
                cost_with_tax,
                cost_with_overhead,
            })
        })
        .collect()
}

fn finite(source: &Path, row: usize, column: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ReportError::InvalidValue {
            source_file: source.to_path_buf(),
            row,
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}

struct Cells<'a> {
    table: &'a RawTable,
    columns: &'a ColumnIndex,
}

impl Cells<'_> {
    fn cell<'r>(&self, row: &'r StringRecord, column: &str) -> &'r str {
        self.columns
            .get(column)
            .and_then(|index| row.get(index))
            .unwrap_or_default()
    }

    fn raw<'r>(&self, row: &'r StringRecord, column: &str) -> &'r str {
        self.cell(row, column).trim()
    }

    fn text(&self, row: &StringRecord, column: &str) -> String {
        self.raw(row, column).to_string()
    }

    // Scope keys are taken verbatim; only the blank check ignores whitespace.
    fn scope(&self, row: &StringRecord, row_number: usize) -> Result<String> {
        let value = self.cell(row, schema::SCOPE);
        if value.trim().is_empty() {
            return Err(self.invalid(row_number, schema::SCOPE, value));
        }
        Ok(value.to_string())
    }

    fn number(&self, row: &StringRecord, row_number: usize, column: &str) -> Result<f64> {
        let value = self.raw(row, column);
        match value.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(self.invalid(row_number, column, value)),
        }
    }

    fn invalid(&self, row: usize, column: &str, value: &str) -> ReportError {
        ReportError::InvalidValue {
            source_file: self.table.source.clone(),
            row,
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}
