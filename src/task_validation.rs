use crate::task::{CleanStatus, Task, TaskId};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),
    #[error("task {0} not found")]
    NotFound(TaskId),
    #[error("unknown cleaning type '{0}'")]
    UnknownCleaningType(String),
    #[error("unknown clean status '{0}' (expected Cleaned or Uncleaned)")]
    UnknownStatus(String),
}

impl TaskError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub fn validate_task(task: &Task) -> Result<(), TaskError> {
    if task.train_model.trim().is_empty() {
        return Err(TaskError::validation(format!(
            "task {} requires a train number",
            task.id
        )));
    }

    match (task.clean_status, task.cleaned_date) {
        (CleanStatus::Cleaned, None) => Err(TaskError::validation(format!(
            "task {} is Cleaned but has no cleaned date",
            task.id
        ))),
        (CleanStatus::Uncleaned, Some(date)) => Err(TaskError::validation(format!(
            "task {} is Uncleaned but carries cleaned date {}",
            task.id, date
        ))),
        _ => Ok(()),
    }
}

pub fn validate_task_collection(tasks: &[Task]) -> Result<(), TaskError> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen_ids.insert(task.id) {
            return Err(TaskError::validation(format!(
                "duplicate task id {}",
                task.id
            )));
        }
        validate_task(task)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::CleaningType;
    use chrono::NaiveDate;

    fn sample(id: u64) -> Task {
        Task::new(
            TaskId(id),
            "T101",
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            CleaningType::CabFront,
        )
    }

    #[test]
    fn blank_train_number_is_rejected() {
        let mut task = sample(1);
        task.train_model = "   ".into();
        assert!(matches!(validate_task(&task), Err(TaskError::Validation(_))));
    }

    #[test]
    fn cleaned_without_date_is_rejected() {
        let mut task = sample(1);
        task.clean_status = CleanStatus::Cleaned;
        let err = validate_task(&task).unwrap_err();
        assert!(err.to_string().contains("no cleaned date"), "{err}");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let tasks = vec![sample(4), sample(4)];
        let err = validate_task_collection(&tasks).unwrap_err();
        assert_eq!(err, TaskError::Validation("duplicate task id 4".into()));
    }
}
