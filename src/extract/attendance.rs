use super::{DailySummary, ExtractError, SheetLayout, parse_date_label};
use crate::workbook::SheetGrid;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateColumn {
    /// Header text as shown in the sheet.
    pub label: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainAttendance {
    pub train_number: String,
    pub marks: BTreeMap<NaiveDate, bool>,
}

/// Per-train, per-date work marks. Date columns are kept in ascending date
/// order and trains in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceTable {
    pub dates: Vec<DateColumn>,
    pub trains: Vec<TrainAttendance>,
}

impl AttendanceTable {
    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trains.len()
    }

    pub fn marks_for(&self, train_number: &str) -> Option<&BTreeMap<NaiveDate, bool>> {
        self.trains
            .iter()
            .find(|t| t.train_number == train_number)
            .map(|t| &t.marks)
    }

    pub fn is_marked(&self, train_number: &str, date: NaiveDate) -> bool {
        self.marks_for(train_number)
            .and_then(|marks| marks.get(&date))
            .copied()
            .unwrap_or(false)
    }

    /// Attendance right after an import: every imported train is marked
    /// present on `today` until the per-date details are extracted.
    pub fn seeded(summary: &DailySummary, today: NaiveDate) -> Self {
        let mut table = Self {
            dates: vec![DateColumn {
                label: today.format("%Y-%m-%d").to_string(),
                date: today,
            }],
            trains: Vec::new(),
        };
        for row in &summary.rows {
            table.upsert(TrainAttendance {
                train_number: row.train_number.clone(),
                marks: BTreeMap::from([(today, true)]),
            });
        }
        table
    }

    fn upsert(&mut self, entry: TrainAttendance) -> bool {
        match self
            .trains
            .iter_mut()
            .find(|t| t.train_number == entry.train_number)
        {
            Some(existing) => {
                *existing = entry;
                true
            }
            None => {
                self.trains.push(entry);
                false
            }
        }
    }
}

/// Reads the date header row and returns `(column, date)` pairs sorted by
/// date. When two columns carry the same date the rightmost one wins.
pub fn collect_date_columns(
    grid: &SheetGrid,
    layout: &SheetLayout,
) -> Result<Vec<(usize, DateColumn)>, ExtractError> {
    let row = layout.date_header_row;
    let last_column = grid.last_column().unwrap_or(0);

    let mut columns = Vec::new();
    for column in layout.first_date_column..=last_column {
        let cell = grid.get(row, column);
        let label = cell.to_string();
        if label.trim().is_empty() {
            continue;
        }
        let date = parse_date_label(cell).ok_or_else(|| ExtractError::InvalidDateLabel {
            row,
            column,
            label: label.clone(),
        })?;
        columns.push((column, DateColumn { label, date }));
    }

    columns.sort_by_key(|(_, header)| header.date);
    let mut unique: Vec<(usize, DateColumn)> = Vec::with_capacity(columns.len());
    for entry in columns {
        if let Some(last) = unique.last_mut().filter(|last| last.1.date == entry.1.date) {
            warn!(
                "date {} appears in columns {} and {}; using column {}",
                entry.1.date, last.0, entry.0, entry.0
            );
            *last = entry;
        } else {
            unique.push(entry);
        }
    }
    debug!("found {} date columns in header row {}", unique.len(), row);
    Ok(unique)
}

/// Records, for every train record and every date column, whether the
/// cell holds the work marker.
pub fn attendance(grid: &SheetGrid, layout: &SheetLayout) -> Result<AttendanceTable, ExtractError> {
    layout.validate_against(grid)?;
    let columns = collect_date_columns(grid, layout)?;

    let mut table = AttendanceTable {
        dates: columns.iter().map(|(_, header)| header.clone()).collect(),
        trains: Vec::new(),
    };
    for row in layout.record_rows(grid) {
        let train_number = grid.get(row, layout.train_number_column).to_string();
        let train_number = train_number.trim();
        if train_number.is_empty() {
            continue;
        }

        let marks = columns
            .iter()
            .map(|(column, header)| (header.date, grid.get(row, *column).is_text(&layout.work_marker)))
            .collect();
        let replaced = table.upsert(TrainAttendance {
            train_number: train_number.to_string(),
            marks,
        });
        if replaced {
            warn!("train {train_number} appears more than once; keeping row {row}");
        }
    }
    Ok(table)
}
