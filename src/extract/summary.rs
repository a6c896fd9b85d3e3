use super::{ExtractError, SheetLayout};
use crate::workbook::{CellValue, SheetGrid};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Marker counts for one train record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcelRow {
    pub train_number: String,
    /// External water washed.
    pub w_count: usize,
    /// Compartment cleaned.
    pub c_count: usize,
    /// Released to morning service.
    pub s_count: usize,
    pub phd_count: usize,
    pub tad_count: usize,
    pub hhs_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub rows: Vec<ExcelRow>,
    pub train_numbers: BTreeSet<String>,
}

impl DailySummary {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First record for `train_number`.
    pub fn find(&self, train_number: &str) -> Option<&ExcelRow> {
        self.rows.iter().find(|row| row.train_number == train_number)
    }
}

/// Counts the cleaning markers of every train record. Each record spans two
/// rows: W/C/S are counted in the first, P/T/H in the second. Records
/// without a train number are skipped.
pub fn summarize(grid: &SheetGrid, layout: &SheetLayout) -> Result<DailySummary, ExtractError> {
    layout.validate_against(grid)?;

    let mut summary = DailySummary::default();
    let mut skipped = 0usize;
    for row in layout.record_rows(grid) {
        let train_number = grid.get(row, layout.train_number_column).to_string();
        let train_number = train_number.trim();
        if train_number.is_empty() {
            skipped += 1;
            continue;
        }

        let [w, c, s] = count_markers(grid.row(row), layout, &layout.primary_markers);
        let [p, t, h] = count_markers(grid.row(row + 1), layout, &layout.secondary_markers);
        summary.rows.push(ExcelRow {
            train_number: train_number.to_string(),
            w_count: w,
            c_count: c,
            s_count: s,
            phd_count: p,
            tad_count: t,
            hhs_count: h,
        });
        summary.train_numbers.insert(train_number.to_string());
    }

    debug!(
        "summarized {} train records ({} without train number)",
        summary.rows.len(),
        skipped
    );
    Ok(summary)
}

/// Counts occurrences of each marker letter across the marker cells of a
/// row. A marker cell holds marker letters, optionally separated by
/// whitespace or punctuation (`W/C`, `W,S`), so identifiers such as train
/// numbers never contribute to the counts.
fn count_markers(cells: &[CellValue], layout: &SheetLayout, markers: &[char; 3]) -> [usize; 3] {
    let mut counts = [0usize; 3];
    for (column, cell) in cells.iter().enumerate() {
        if column == layout.train_number_column {
            continue;
        }
        let CellValue::Text(text) = cell else {
            continue;
        };
        let is_marker_cell = text.chars().any(|ch| layout.is_marker_char(ch))
            && text
                .chars()
                .all(|ch| is_separator(ch) || layout.is_marker_char(ch));
        if !is_marker_cell {
            continue;
        }
        for ch in text.chars() {
            if let Some(idx) = markers.iter().position(|m| *m == ch) {
                counts[idx] += 1;
            }
        }
    }
    counts
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch.is_ascii_punctuation()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_marker_cells_count_each_letter() {
        let layout = SheetLayout::default();
        let cells: Vec<CellValue> = ["", "T7", "WC", "W S", "CX", "C1"]
            .into_iter()
            .map(CellValue::from)
            .collect();
        assert_eq!(
            count_markers(&cells, &layout, &layout.primary_markers),
            [2, 1, 1]
        );
    }

    #[test]
    fn separated_markers_count_each_letter() {
        let layout = SheetLayout::default();
        let cells: Vec<CellValue> = ["", "T1", "W/C", "W,S", "-", "C-1"]
            .into_iter()
            .map(CellValue::from)
            .collect();
        assert_eq!(
            count_markers(&cells, &layout, &layout.primary_markers),
            [2, 1, 1]
        );
    }
}
