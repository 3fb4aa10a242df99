use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};

use crate::costing::error::{ReportError, Result};
use crate::costing::flatten::{CellValue, REPORT_SHEETS, SheetTable, WorkbookData};

/// Reads the sheets of a generated report back into tables. Display formats
/// are ignored; numeric cells come back as plain numbers.
pub fn read_report(path: &Path) -> Result<WorkbookData> {
    if !path.exists() {
        return Err(ReportError::InputNotFound(path.to_path_buf()));
    }
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let tables = REPORT_SHEETS
        .iter()
        .map(|name| {
            let range = read_required_sheet(&mut workbook, name)?;
            Ok(range_to_table(name, &range))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(WorkbookData { tables })
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ReportError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(ReportError::from)?;
    Ok(range)
}

fn range_to_table(name: &str, range: &Range<DataType>) -> SheetTable {
    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };
    let rows: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    SheetTable {
        sheet_name: name.to_string(),
        columns,
        rows,
    }
}

fn cell_to_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Empty => CellValue::Empty,
        other => CellValue::Text(cell_to_string(other)),
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
