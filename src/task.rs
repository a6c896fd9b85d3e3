use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::task_validation::TaskError;

/// Stable identifier handed out by the repository when a task is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(TaskId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CleaningType {
    #[serde(rename = "Compartment General Cleaning (3 days)")]
    CompartmentGeneral,
    #[serde(rename = "EMU Cab Wax Polishing (120 days)")]
    CabWaxPolishing,
    #[serde(rename = "Compartment Heavy Floor Cleaning (45 days)")]
    CompartmentHeavyFloor,
    #[serde(rename = "Compartment Heavy Cleaning (90 days)")]
    CompartmentHeavy,
    #[serde(rename = "Cab Front Cleaning (45 days)")]
    CabFront,
    #[serde(rename = "Exterior Car-body Cleaning (90 days)")]
    ExteriorCarBody,
    #[serde(rename = "Compartment Pest Control (Monthly)")]
    CompartmentPestControl,
}

impl CleaningType {
    pub const ALL: [CleaningType; 7] = [
        CleaningType::CompartmentGeneral,
        CleaningType::CabWaxPolishing,
        CleaningType::CompartmentHeavyFloor,
        CleaningType::CompartmentHeavy,
        CleaningType::CabFront,
        CleaningType::ExteriorCarBody,
        CleaningType::CompartmentPestControl,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CleaningType::CompartmentGeneral => "Compartment General Cleaning (3 days)",
            CleaningType::CabWaxPolishing => "EMU Cab Wax Polishing (120 days)",
            CleaningType::CompartmentHeavyFloor => "Compartment Heavy Floor Cleaning (45 days)",
            CleaningType::CompartmentHeavy => "Compartment Heavy Cleaning (90 days)",
            CleaningType::CabFront => "Cab Front Cleaning (45 days)",
            CleaningType::ExteriorCarBody => "Exterior Car-body Cleaning (90 days)",
            CleaningType::CompartmentPestControl => "Compartment Pest Control (Monthly)",
        }
    }

    /// Short key accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            CleaningType::CompartmentGeneral => "general",
            CleaningType::CabWaxPolishing => "wax",
            CleaningType::CompartmentHeavyFloor => "floor",
            CleaningType::CompartmentHeavy => "heavy",
            CleaningType::CabFront => "cab-front",
            CleaningType::ExteriorCarBody => "exterior",
            CleaningType::CompartmentPestControl => "pest",
        }
    }

    /// Nominal number of days between two cleanings of this type.
    /// Monthly pest control is counted as 30 days.
    pub fn interval_days(self) -> i64 {
        match self {
            CleaningType::CompartmentGeneral => 3,
            CleaningType::CabWaxPolishing => 120,
            CleaningType::CompartmentHeavyFloor => 45,
            CleaningType::CompartmentHeavy => 90,
            CleaningType::CabFront => 45,
            CleaningType::ExteriorCarBody => 90,
            CleaningType::CompartmentPestControl => 30,
        }
    }
}

impl fmt::Display for CleaningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CleaningType {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CleaningType::ALL
            .into_iter()
            .find(|ty| ty.label() == trimmed || ty.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TaskError::UnknownCleaningType(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CleanStatus {
    Cleaned,
    Uncleaned,
}

impl CleanStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CleanStatus::Cleaned => "Cleaned",
            CleanStatus::Uncleaned => "Uncleaned",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            CleanStatus::Cleaned => CleanStatus::Uncleaned,
            CleanStatus::Uncleaned => CleanStatus::Cleaned,
        }
    }
}

impl fmt::Display for CleanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleanStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("cleaned") {
            Ok(CleanStatus::Cleaned)
        } else if trimmed.eq_ignore_ascii_case("uncleaned") {
            Ok(CleanStatus::Uncleaned)
        } else {
            Err(TaskError::UnknownStatus(trimmed.to_string()))
        }
    }
}

/// How a task row is highlighted relative to the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRowClass {
    Cleaned,
    DueToday,
    Overdue,
    Upcoming,
}

impl TaskRowClass {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskRowClass::Cleaned => "cleaned",
            TaskRowClass::DueToday => "today",
            TaskRowClass::Overdue => "overdue",
            TaskRowClass::Upcoming => "upcoming",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub train_model: String,
    pub scheduled_date: NaiveDate,
    pub cleaning_type: CleaningType,
    pub clean_status: CleanStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaned_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(
        id: TaskId,
        train_model: impl Into<String>,
        scheduled_date: NaiveDate,
        cleaning_type: CleaningType,
    ) -> Self {
        Self {
            id,
            train_model: train_model.into(),
            scheduled_date,
            cleaning_type,
            clean_status: CleanStatus::Uncleaned,
            cleaned_date: None,
        }
    }

    pub fn is_cleaned(&self) -> bool {
        self.clean_status == CleanStatus::Cleaned
    }

    /// Flips the clean status. Marking a task cleaned stamps `today` as the
    /// cleaned date; marking it uncleaned clears the date again.
    pub fn toggle_clean(&mut self, today: NaiveDate) -> CleanStatus {
        self.clean_status = self.clean_status.toggled();
        self.cleaned_date = match self.clean_status {
            CleanStatus::Cleaned => Some(today),
            CleanStatus::Uncleaned => None,
        };
        self.clean_status
    }

    pub fn classify(&self, today: NaiveDate) -> TaskRowClass {
        if self.is_cleaned() {
            TaskRowClass::Cleaned
        } else if self.scheduled_date == today {
            TaskRowClass::DueToday
        } else if self.scheduled_date < today {
            TaskRowClass::Overdue
        } else {
            TaskRowClass::Upcoming
        }
    }
}
