use std::path::PathBuf;

use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, warn};

use crate::error::{Result, TaskerError};
use crate::model::{self, Priority, Status, Task, date_format};
use crate::query::{Filter, Search, SortOrder};
use crate::store::codec::{LoadReport, TaskFile};

/// The authoritative task collection for one session.
///
/// Owns id assignment and the active sort order. When backed by a file, every
/// successful mutation is flushed before returning. A failed flush is reported
/// but the in-memory change stands.
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    sort_order: SortOrder,
    file: Option<TaskFile>,
    clock: Box<dyn Clock>,
}

impl TaskStore {
    pub fn in_memory(clock: impl Clock + 'static) -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            sort_order: SortOrder::default(),
            file: None,
            clock: Box::new(clock),
        }
    }

    /// Load the store from `path`. An unreadable file yields an empty store
    /// and is reported in the returned [`LoadReport`].
    pub fn open(path: impl Into<PathBuf>, clock: impl Clock + 'static) -> Result<(Self, LoadReport)> {
        let file = TaskFile::new(path);
        let (tasks, report) = match file.load() {
            Ok(loaded) => loaded,
            Err(TaskerError::CorruptStore(path, reason)) => {
                warn!(%path, %reason, "task file is unreadable, starting with an empty list");
                let report = LoadReport {
                    corrupt: Some(reason),
                    ..LoadReport::default()
                };
                (Vec::new(), report)
            }
            Err(e) => return Err(e),
        };

        let mut store = Self::in_memory(clock);
        store.next_id = tasks
            .iter()
            .map(|t| t.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        store.tasks = tasks;
        store.file = Some(file);
        Ok((store, report))
    }

    pub fn today(&self) -> NaiveDate {
        model::today(self.clock.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Id the next created task will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    pub fn create(
        &mut self,
        title: &str,
        description: &str,
        completion_date: NaiveDate,
        priority: Priority,
    ) -> Result<Task> {
        let title = required(title, "title")?;
        let description = required(description, "description")?;
        let today = self.today();
        if completion_date < today {
            return Err(TaskerError::Validation(format!(
                "completion date {} is in the past",
                date_format::format(completion_date)
            )));
        }

        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| TaskerError::Validation("no task ids left to assign".into()))?;
        let task = Task::new(id, title, description, completion_date, today, priority);
        self.tasks.push(task.clone());
        debug!(id, "created task");

        self.flush()?;
        Ok(task)
    }

    pub fn find(&self, id: u64) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or(TaskerError::TaskNotFound(id))
    }

    fn find_mut(&mut self, id: u64) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskerError::TaskNotFound(id))
    }

    pub fn advance_status(&mut self, id: u64) -> Result<Task> {
        let task = self.find_mut(id)?;
        task.advance_status()?;
        let task = task.clone();
        debug!(id, status = %task.status, "advanced task");
        self.flush()?;
        Ok(task)
    }

    pub fn edit_description(&mut self, id: u64, description: &str) -> Result<Task> {
        let task = self.find_mut(id)?;
        // Lifecycle errors win over blank text.
        let description = if task.status == Status::New {
            required(description, "description")?
        } else {
            description.to_string()
        };
        task.change_description(description)?;
        let task = task.clone();
        self.flush()?;
        Ok(task)
    }

    /// Delete a task and drop it from the collection straight away.
    pub fn delete(&mut self, id: u64) -> Result<Task> {
        let task = self.find_mut(id)?;
        task.mark_deleted()?;
        let task = task.clone();
        self.tasks.retain(|t| !t.deleted);
        debug!(id, "deleted task");
        self.flush()?;
        Ok(task)
    }

    pub fn rate(&mut self, id: u64, value: i64) -> Result<Task> {
        let task = self.find_mut(id)?;
        task.rate(value)?;
        let task = task.clone();
        self.flush()?;
        Ok(task)
    }

    /// All tasks in the active sort order. Stored order is untouched.
    pub fn list(&self) -> Vec<Task> {
        self.ordered(|_| true)
    }

    pub fn filter(&self, filter: Filter) -> Vec<Task> {
        let today = self.today();
        self.ordered(|t| filter.matches(t, today))
    }

    pub fn search(&self, search: &Search) -> Result<Vec<Task>> {
        search.validate()?;
        Ok(self.ordered(|t| search.matches(t)))
    }

    fn ordered(&self, keep: impl Fn(&Task) -> bool) -> Vec<Task> {
        let mut out: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| !t.deleted && keep(t))
            .cloned()
            .collect();
        self.sort_order.sort(&mut out);
        out
    }

    /// Write the collection to the backing file, if any.
    pub fn flush(&self) -> Result<()> {
        match &self.file {
            Some(file) => file.save(&self.tasks),
            None => Ok(()),
        }
    }
}

fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskerError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
