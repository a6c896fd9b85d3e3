use crate::workbook::{CellValue, excel_serial_to_date};
use chrono::NaiveDate;

// US month/day order is tried before day/month, matching how spreadsheet
// applications read ambiguous slash dates.
const TEXT_FORMATS: [&str; 10] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

/// Interprets a header cell as a date: native date cells, Excel serial
/// numbers and a handful of common text spellings.
pub fn parse_date_label(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(date) => Some(*date),
        CellValue::Number(serial) if *serial >= 1.0 => excel_serial_to_date(*serial),
        CellValue::Text(text) => parse_date_text(text),
        _ => None,
    }
}

pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    TEXT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            // ISO timestamps such as 2025-01-02T00:00:00
            text.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}
