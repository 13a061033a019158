//! Sort orders, filters and search criteria over the task collection.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;

use crate::error::{Result, TaskerError};
use crate::model::{Priority, Status, Task};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "snake_case")]
pub enum SortOrder {
    /// Highest priority first
    #[default]
    Priority,
    /// Oldest creation date first
    Created,
    /// Title, lexicographic
    Title,
    /// Earliest completion date first
    Completion,
}

impl SortOrder {
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Priority => b.priority.cmp(&a.priority),
            Self::Created => a.create_date.cmp(&b.create_date),
            Self::Title => a.title.cmp(&b.title),
            Self::Completion => a.completion_date.cmp(&b.completion_date),
        }
    }

    /// Stable: equal keys keep their relative order.
    pub fn sort(self, tasks: &mut [Task]) {
        tasks.sort_by(|a, b| self.compare(a, b));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Priority(Priority),
    Status(Status),
    Overdue,
}

impl Filter {
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match *self {
            Self::Priority(p) => task.priority == p,
            Self::Status(s) => task.status == s,
            Self::Overdue => task.is_overdue(today),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search {
    /// Case-insensitive substring of title or description.
    Text(String),
    CompletionDate(NaiveDate),
    /// Completion date within `[start, end]`.
    DateRange { start: NaiveDate, end: NaiveDate },
    Month { month: u32, year: i32 },
    Priority(Priority),
}

impl Search {
    /// Reject criteria that can never match anything sensible.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Text(q) if q.trim().is_empty() => Err(TaskerError::Validation(
                "search text must not be empty".into(),
            )),
            Self::DateRange { start, end } if start > end => Err(TaskerError::Validation(format!(
                "range start {} is after end {}",
                start.format(crate::model::date_format::FORMAT),
                end.format(crate::model::date_format::FORMAT)
            ))),
            Self::Month { month, .. } if !(1..=12).contains(month) => Err(
                TaskerError::Validation(format!("month {month} is out of range (expected 1-12)")),
            ),
            _ => Ok(()),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::Text(q) => {
                let needle = q.trim().to_lowercase();
                task.title.to_lowercase().contains(&needle)
                    || task.description.to_lowercase().contains(&needle)
            }
            Self::CompletionDate(d) => task.completion_date == *d,
            Self::DateRange { start, end } => {
                (*start..=*end).contains(&task.completion_date)
            }
            Self::Month { month, year } => {
                task.completion_date.month() == *month && task.completion_date.year() == *year
            }
            Self::Priority(p) => task.priority == *p,
        }
    }
}
