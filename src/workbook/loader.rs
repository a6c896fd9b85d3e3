use super::{CellValue, SheetGrid, WorkbookError, excel_serial_to_date};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDate;
use log::{debug, info};
use std::path::Path;

/// Loads the first sheet of a workbook, choosing the reader from the file
/// extension.
pub fn load_workbook<P: AsRef<Path>>(path: P) -> Result<SheetGrid, WorkbookError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let grid = match extension.as_str() {
        "csv" => load_csv(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "ods" => load_spreadsheet(path)?,
        other => return Err(WorkbookError::UnsupportedFormat(other.to_string())),
    };
    info!(
        "loaded workbook {} ({} rows x {} columns)",
        path.display(),
        grid.height(),
        grid.width()
    );
    Ok(grid)
}

pub fn load_spreadsheet<P: AsRef<Path>>(path: P) -> Result<SheetGrid, WorkbookError> {
    let mut workbook = open_workbook_auto(path.as_ref())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(WorkbookError::NoSheets)??;

    let mut grid = SheetGrid::default();
    let Some((start_row, start_col)) = range.start() else {
        return Ok(grid);
    };
    for (row, col, data) in range.used_cells() {
        let value = cell_from_data(data);
        if value.is_empty() {
            continue;
        }
        grid.set(start_row as usize + row, start_col as usize + col, value);
    }
    if let Some((end_row, _)) = range.end() {
        // keep trailing blank rows that belong to the sheet's used range
        let height = end_row as usize + 1;
        if grid.height() < height {
            grid.set(height - 1, 0, CellValue::Empty);
        }
    }
    debug!("read {} rows from first sheet", grid.height());
    Ok(grid)
}

/// Reads a headerless CSV file; every non-empty field becomes a text cell.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<SheetGrid, WorkbookError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path.as_ref())?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(CellValue::from).collect::<Vec<_>>());
    }
    Ok(SheetGrid::new(rows))
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
            .map(CellValue::Date)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(err) => CellValue::Text(err.to_string()),
        _ => CellValue::Empty,
    }
}
