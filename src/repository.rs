use crate::filter::{self, TaskFilter};
use crate::task::{CleanStatus, CleaningType, Task, TaskId};
use crate::task_validation::{self, TaskError};
use chrono::NaiveDate;
use log::debug;

/// Owns the heavy-cleaning tasks. The collection is kept ordered by
/// scheduled date and every mutation is addressed by [`TaskId`].
#[derive(Debug, Clone)]
pub struct TaskRepository {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a repository from existing records. Ids are kept and the
    /// id counter resumes after the largest one.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, TaskError> {
        task_validation::validate_task_collection(&tasks)?;
        let next_id = tasks.iter().map(|t| t.id.0).max().map_or(1, |max| max + 1);
        let mut repo = Self { tasks, next_id };
        repo.sort();
        Ok(repo)
    }

    pub fn add_task(
        &mut self,
        train_model: &str,
        scheduled_date: NaiveDate,
        cleaning_type: CleaningType,
    ) -> Result<TaskId, TaskError> {
        let id = TaskId(self.next_id);
        let task = Task::new(id, train_model.trim(), scheduled_date, cleaning_type);
        task_validation::validate_task(&task)?;

        self.next_id += 1;
        self.tasks.push(task);
        self.sort();
        debug!("added task {id} for {train_model} on {scheduled_date}");
        Ok(id)
    }

    pub fn toggle_clean(&mut self, id: TaskId, today: NaiveDate) -> Result<CleanStatus, TaskError> {
        let task = self.get_mut(id).ok_or(TaskError::NotFound(id))?;
        let status = task.toggle_clean(today);
        debug!("task {id} is now {status}");
        Ok(status)
    }

    pub fn remove_task(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let idx = self.position_of(id).ok_or(TaskError::NotFound(id))?;
        let removed = self.tasks.remove(idx);
        debug!("removed task {id}");
        Ok(removed)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Current display position of a task.
    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn filter(&self, criteria: &TaskFilter) -> Vec<&Task> {
        filter::filter_tasks(&self.tasks, criteria)
    }

    /// Unique train numbers in natural order, for filter choices.
    pub fn distinct_train_models(&self) -> Vec<String> {
        let mut models: Vec<String> = Vec::new();
        for task in &self.tasks {
            if !models.contains(&task.train_model) {
                models.push(task.train_model.clone());
            }
        }
        models.sort_by(|a, b| filter::natural_cmp(a, b));
        models
    }

    pub fn distinct_scheduled_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.tasks.iter().map(|t| t.scheduled_date).collect();
        dates.sort();
        dates.dedup();
        dates
    }

    fn sort(&mut self) {
        self.tasks.sort_by_key(|t| t.scheduled_date);
    }
}
