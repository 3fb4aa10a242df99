use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, warn};

use crate::costing::error::{FormattingWarning, Result};
use crate::costing::flatten::{CellValue, SheetTable, WorkbookData};

/// Display format applied to every numeric data cell.
pub const CURRENCY_FORMAT: &str = "$#,##0.00";
/// Widest column Excel accepts, in characters.
pub const MAX_COLUMN_WIDTH: usize = 255;
/// Characters added to the longest value of a column.
const WIDTH_PADDING: usize = 2;

/// Writes the provided workbook data to the given path and returns the cells
/// that could not be styled.
///
/// Data is written first; the styling pass that follows only ever produces
/// warnings, so a report whose styling partially fails is still saved.
pub fn write_workbook(path: &Path, workbook: &WorkbookData) -> Result<Vec<FormattingWarning>> {
    let mut workbook_writer = Workbook::new();
    let currency = Format::new().set_num_format(CURRENCY_FORMAT);
    let mut warnings = Vec::new();

    for table in &workbook.tables {
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(&table.sheet_name)?;
        write_cells(worksheet, table)?;
        warnings.extend(style_sheet(worksheet, table, &currency));
    }

    workbook_writer.save(path)?;
    debug!(
        sheet_count = workbook.tables.len(),
        warning_count = warnings.len(),
        "workbook saved"
    );
    Ok(warnings)
}

fn write_cells(worksheet: &mut Worksheet, table: &SheetTable) -> Result<()> {
    for (col_idx, header) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, header)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            match cell {
                CellValue::Text(value) => {
                    worksheet.write_string(excel_row, col_idx as u16, value)?;
                }
                CellValue::Number(value) => {
                    worksheet.write_number(excel_row, col_idx as u16, *value)?;
                }
                CellValue::Empty => {}
            }
        }
    }

    Ok(())
}

fn style_sheet(
    worksheet: &mut Worksheet,
    table: &SheetTable,
    currency: &Format,
) -> Vec<FormattingWarning> {
    let mut warnings = Vec::new();
    let mut record = |row: usize, col: usize, reason: String| {
        let warning = FormattingWarning {
            sheet: table.sheet_name.clone(),
            cell: cell_reference(row, col),
            reason,
        };
        warn!(%warning, "skipping cell while formatting report");
        warnings.push(warning);
    };

    for col_idx in 0..table.columns.len() {
        let measure = measure_column(table, col_idx);
        for (row_idx, length) in measure.oversized {
            record(
                row_idx + 1,
                col_idx,
                format!("{length} characters exceed the column width limit"),
            );
        }
        if let Err(error) = worksheet.set_column_width(col_idx as u16, measure.width as f64) {
            record(0, col_idx, format!("column width not applied: {error}"));
        }
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate().skip(1) {
            let Some(value) = cell.as_number() else {
                continue;
            };
            let excel_row = (row_idx + 1) as u32;
            if let Err(error) =
                worksheet.write_number_with_format(excel_row, col_idx as u16, value, currency)
            {
                record(row_idx + 1, col_idx, format!("currency format not applied: {error}"));
            }
        }
    }

    warnings
}

/// Width of a column: the longest header or cell text plus padding. Cells
/// too long to fit any column are left out of the measurement.
pub fn column_width(table: &SheetTable, col: usize) -> usize {
    measure_column(table, col).width
}

struct ColumnMeasure {
    width: usize,
    /// Zero-based data row index and text length of each skipped cell.
    oversized: Vec<(usize, usize)>,
}

fn measure_column(table: &SheetTable, col: usize) -> ColumnMeasure {
    let mut max_length = table
        .columns
        .get(col)
        .map(|header| header.chars().count())
        .unwrap_or_default();
    let mut oversized = Vec::new();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let Some(cell) = row.get(col) else {
            continue;
        };
        let length = cell.display_text().chars().count();
        if length > MAX_COLUMN_WIDTH {
            oversized.push((row_idx, length));
            continue;
        }
        max_length = max_length.max(length);
    }

    ColumnMeasure {
        width: (max_length + WIDTH_PADDING).min(MAX_COLUMN_WIDTH),
        oversized,
    }
}

/// A1-style reference for a zero-based row and column.
pub fn cell_reference(row: usize, col: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = col + 1;
    while remaining > 0 {
        let offset = ((remaining - 1) % 26) as u8;
        letters.push((b'A' + offset) as char);
        remaining = (remaining - 1) / 26;
    }
    letters.iter().rev().collect::<String>() + &(row + 1).to_string()
}
