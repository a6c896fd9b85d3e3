use crate::extract::{self, AttendanceTable, DailySummary, ExtractError, SheetLayout};
use crate::presentation::PresentationState;
use crate::workbook::SheetGrid;
use chrono::NaiveDate;
use log::{debug, info};

/// Daily cleaning import state: the loaded workbook and everything derived
/// from it. Derived tables are rebuilt from scratch on every action.
#[derive(Debug, Clone, Default)]
pub struct DailyCleaning {
    layout: SheetLayout,
    workbook: Option<SheetGrid>,
    summary: DailySummary,
    attendance: AttendanceTable,
}

impl DailyCleaning {
    pub fn new(layout: SheetLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    pub fn has_workbook(&self) -> bool {
        self.workbook.is_some()
    }

    pub fn summary(&self) -> &DailySummary {
        &self.summary
    }

    pub fn attendance(&self) -> &AttendanceTable {
        &self.attendance
    }

    /// Loads a workbook and computes the marker summary. On error the
    /// previously imported workbook stays in place.
    pub fn import(&mut self, grid: SheetGrid, today: NaiveDate) -> Result<&DailySummary, ExtractError> {
        let summary = extract::summarize(&grid, &self.layout)?;
        info!(
            "imported {} train records ({} distinct trains)",
            summary.len(),
            summary.train_numbers.len()
        );
        self.attendance = AttendanceTable::seeded(&summary, today);
        self.summary = summary;
        self.workbook = Some(grid);
        Ok(&self.summary)
    }

    /// Extracts per-date attendance from the loaded workbook and flips the
    /// details view. Without a workbook nothing happens and the current
    /// (empty) table is returned.
    pub fn show_details(
        &mut self,
        view: &mut PresentationState,
    ) -> Result<&AttendanceTable, ExtractError> {
        let Some(grid) = self.workbook.as_ref() else {
            debug!("details requested before any workbook was imported");
            return Ok(&self.attendance);
        };
        self.attendance = extract::attendance(grid, &self.layout)?;
        view.toggle_details();
        Ok(&self.attendance)
    }
}
