use crate::workbook::SheetGrid;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("sheet has {found} rows but the layout needs at least {required}")]
    TooFewRows { required: usize, found: usize },
    #[error("expected header '{expected}' at row {row}, column {column} but found '{found}'")]
    MissingHeader {
        row: usize,
        column: usize,
        expected: String,
        found: String,
    },
    #[error("invalid layout configuration: {0}")]
    Config(String),
}

/// A cell whose text must match before extraction is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMarker {
    pub row: usize,
    pub column: usize,
    pub text: String,
}

/// Row and column positions of the daily cleaning template. Rows and
/// columns are zero-based; the default date header row 12 is row 13 in a
/// spreadsheet application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub date_header_row: usize,
    pub first_data_row: usize,
    pub row_stride: usize,
    pub train_number_column: usize,
    pub first_date_column: usize,
    pub work_marker: String,
    /// Counted in the first row of each train record (W, C, S).
    pub primary_markers: [char; 3],
    /// Counted in the second row of each train record (P, T, H).
    pub secondary_markers: [char; 3],
    pub required_headers: Vec<HeaderMarker>,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            date_header_row: 12,
            first_data_row: 15,
            row_stride: 2,
            train_number_column: 1,
            first_date_column: 7,
            work_marker: "W".to_string(),
            primary_markers: ['W', 'C', 'S'],
            secondary_markers: ['P', 'T', 'H'],
            required_headers: Vec::new(),
        }
    }
}

impl SheetLayout {
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| LayoutError::Config(format!("cannot open {}: {e}", path.display())))?;
        let layout: Self = serde_json::from_reader(file)
            .map_err(|e| LayoutError::Config(format!("cannot parse {}: {e}", path.display())))?;
        layout.check()?;
        Ok(layout)
    }

    pub fn to_json_pretty(&self) -> Result<String, LayoutError> {
        serde_json::to_string_pretty(self).map_err(|e| LayoutError::Config(e.to_string()))
    }

    /// Internal consistency of the layout itself.
    pub fn check(&self) -> Result<(), LayoutError> {
        if self.row_stride == 0 {
            return Err(LayoutError::Config("row_stride must be at least 1".into()));
        }
        if self.work_marker.is_empty() {
            return Err(LayoutError::Config("work_marker must not be empty".into()));
        }
        if self.first_data_row <= self.date_header_row {
            return Err(LayoutError::Config(format!(
                "first_data_row ({}) must come after date_header_row ({})",
                self.first_data_row, self.date_header_row
            )));
        }
        Ok(())
    }

    /// Confirms that `grid` looks like this template before any extraction.
    pub fn validate_against(&self, grid: &SheetGrid) -> Result<(), LayoutError> {
        self.check()?;
        if grid.height() < self.first_data_row {
            return Err(LayoutError::TooFewRows {
                required: self.first_data_row,
                found: grid.height(),
            });
        }
        for marker in &self.required_headers {
            let found = grid.get(marker.row, marker.column).to_string();
            if found.trim() != marker.text.trim() {
                return Err(LayoutError::MissingHeader {
                    row: marker.row,
                    column: marker.column,
                    expected: marker.text.clone(),
                    found,
                });
            }
        }
        Ok(())
    }

    /// Characters that may appear in a marker cell.
    pub(crate) fn is_marker_char(&self, c: char) -> bool {
        self.primary_markers.contains(&c) || self.secondary_markers.contains(&c)
    }

    /// Zero-based first rows of every train record present in `grid`.
    pub(crate) fn record_rows(&self, grid: &SheetGrid) -> impl Iterator<Item = usize> {
        (self.first_data_row..grid.height()).step_by(self.row_stride.max(1))
    }
}
