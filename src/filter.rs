use crate::task::{CleanStatus, CleaningType, Task};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Exact-match criteria over the task table. An unset field matches every
/// task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub train_model: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub cleaning_type: Option<CleaningType>,
    pub clean_status: Option<CleanStatus>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_train_model(mut self, train_model: impl Into<String>) -> Self {
        self.train_model = Some(train_model.into());
        self
    }

    pub fn with_scheduled_date(mut self, date: NaiveDate) -> Self {
        self.scheduled_date = Some(date);
        self
    }

    pub fn with_cleaning_type(mut self, cleaning_type: CleaningType) -> Self {
        self.cleaning_type = Some(cleaning_type);
        self
    }

    pub fn with_clean_status(mut self, status: CleanStatus) -> Self {
        self.clean_status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.train_model.as_deref().is_none_or(str::is_empty)
            && self.scheduled_date.is_none()
            && self.cleaning_type.is_none()
            && self.clean_status.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, task: &Task) -> bool {
        let train_ok = match self.train_model.as_deref() {
            None | Some("") => true,
            Some(model) => task.train_model == model,
        };
        train_ok
            && self.scheduled_date.is_none_or(|d| task.scheduled_date == d)
            && self.cleaning_type.is_none_or(|ty| task.cleaning_type == ty)
            && self.clean_status.is_none_or(|s| task.clean_status == s)
    }
}

/// Applies `criteria` and returns the matching tasks ordered by scheduled
/// date, oldest first. Tasks sharing a date keep their relative order.
pub fn filter_tasks<'a, I>(tasks: I, criteria: &TaskFilter) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut matched: Vec<&Task> = tasks.into_iter().filter(|t| criteria.matches(t)).collect();
    matched.sort_by_key(|t| t.scheduled_date);
    matched
}

/// Case-insensitive ordering that compares embedded digit runs by value, so
/// "T9" sorts before "T10".
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let l_trimmed = l_run.trim_start_matches('0');
                let r_trimmed = r_run.trim_start_matches('0');
                let ord = l_trimmed
                    .len()
                    .cmp(&r_trimmed.len())
                    .then_with(|| l_trimmed.cmp(r_trimmed));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_compares_numbers_by_value() {
        let mut models = vec!["T10", "t2", "T1", "A7"];
        models.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(models, vec!["A7", "T1", "t2", "T10"]);
    }

    #[test]
    fn empty_train_model_criterion_matches_everything() {
        let filter = TaskFilter::new().with_train_model("");
        assert!(filter.is_empty());
    }
}
