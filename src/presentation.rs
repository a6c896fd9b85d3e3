use crate::filter::TaskFilter;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    DailyCleaning,
    HeavyCleaning,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::DailyCleaning => "Daily Cleaning",
            Section::HeavyCleaning => "Heavy Cleaning",
        }
    }
}

/// View state kept apart from the task data: active filters, the selected
/// section, table visibility and the date used for row highlighting.
#[derive(Debug, Clone)]
pub struct PresentationState {
    pub filters: TaskFilter,
    pub active_section: Option<Section>,
    pub show_attendance: bool,
    pub show_summary: bool,
    today: NaiveDate,
}

impl PresentationState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            filters: TaskFilter::default(),
            active_section: None,
            show_attendance: false,
            show_summary: true,
            today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn enter(&mut self, section: Section) {
        self.active_section = Some(section);
    }

    pub fn back_to_menu(&mut self) {
        self.active_section = None;
    }

    /// Swaps between the attendance table and the summary table.
    pub fn toggle_details(&mut self) {
        self.show_attendance = !self.show_attendance;
        self.show_summary = !self.show_summary;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_details_swaps_visible_tables() {
        let mut state = PresentationState::new(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        assert!(state.show_summary && !state.show_attendance);
        state.toggle_details();
        assert!(!state.show_summary && state.show_attendance);
        state.toggle_details();
        assert!(state.show_summary && !state.show_attendance);
    }
}
