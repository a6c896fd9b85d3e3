//! Extraction passes over the daily cleaning workbook.
//!
//! Both passes assume the fixed template described by [`SheetLayout`] and
//! check the grid against it first. Individual cells are read leniently:
//! anything missing counts as empty.

pub mod attendance;
pub mod dates;
pub mod layout;
pub mod summary;

pub use attendance::{AttendanceTable, DateColumn, TrainAttendance, attendance, collect_date_columns};
pub use dates::{parse_date_label, parse_date_text};
pub use layout::{HeaderMarker, LayoutError, SheetLayout};
pub use summary::{DailySummary, ExcelRow, summarize};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("header cell at row {row}, column {column} is not a date: '{label}'")]
    InvalidDateLabel {
        row: usize,
        column: usize,
        label: String,
    },
}
