//! Per-status rules for the three lifecycle operations.
//!
//! Each status has one [`TaskState`] implementation. The state object is always
//! looked up from `Task::status`, and a transition writes the new status in the
//! same step, so the two can never disagree. Every operation either succeeds
//! completely or leaves the task untouched.

use crate::error::{Result, TaskerError};
use crate::model::{Status, Task};

pub trait TaskState {
    fn status(&self) -> Status;

    /// Move the task one step forward.
    fn advance(&self, task: &mut Task) -> Result<()>;

    fn change_description(&self, task: &mut Task, description: String) -> Result<()>;

    /// Tombstone the task. Purging is the store's job.
    fn delete(&self, task: &mut Task) -> Result<()>;
}

pub struct NewState;
pub struct InProgressState;
pub struct DoneState;

impl Status {
    pub fn state(self) -> &'static dyn TaskState {
        match self {
            Self::New => &NewState,
            Self::InProgress => &InProgressState,
            Self::Done => &DoneState,
        }
    }
}

fn invalid(task: &Task, reason: &str) -> TaskerError {
    TaskerError::InvalidState(format!("task {}: {reason}", task.id))
}

impl TaskState for NewState {
    fn status(&self) -> Status {
        Status::New
    }

    fn advance(&self, task: &mut Task) -> Result<()> {
        task.status = InProgressState.status();
        Ok(())
    }

    fn change_description(&self, task: &mut Task, description: String) -> Result<()> {
        task.description = description;
        Ok(())
    }

    fn delete(&self, task: &mut Task) -> Result<()> {
        task.deleted = true;
        Ok(())
    }
}

impl TaskState for InProgressState {
    fn status(&self) -> Status {
        Status::InProgress
    }

    fn advance(&self, task: &mut Task) -> Result<()> {
        task.status = DoneState.status();
        Ok(())
    }

    fn change_description(&self, task: &mut Task, _description: String) -> Result<()> {
        Err(invalid(task, "cannot edit description of in-progress task"))
    }

    fn delete(&self, task: &mut Task) -> Result<()> {
        Err(invalid(task, "cannot delete in-progress task"))
    }
}

impl TaskState for DoneState {
    fn status(&self) -> Status {
        Status::Done
    }

    fn advance(&self, task: &mut Task) -> Result<()> {
        Err(invalid(task, "task already complete"))
    }

    fn change_description(&self, task: &mut Task, _description: String) -> Result<()> {
        Err(invalid(task, "cannot edit description of completed task"))
    }

    fn delete(&self, task: &mut Task) -> Result<()> {
        Err(invalid(task, "cannot delete completed task"))
    }
}

impl Task {
    pub fn advance_status(&mut self) -> Result<()> {
        self.status.state().advance(self)
    }

    pub fn change_description(&mut self, description: String) -> Result<()> {
        self.status.state().change_description(self, description)
    }

    pub fn mark_deleted(&mut self) -> Result<()> {
        self.status.state().delete(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use chrono::NaiveDate;

    fn fresh() -> Task {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        Task::new(1, "Title".into(), "Original".into(), day, day, Priority::Low)
    }

    #[test]
    fn state_object_matches_status() {
        for status in [Status::New, Status::InProgress, Status::Done] {
            assert_eq!(status.state().status(), status);
        }
    }

    #[test]
    fn advance_walks_forward_one_step_at_a_time() {
        let mut task = fresh();
        task.advance_status().unwrap();
        assert_eq!(task.status(), Status::InProgress);
        task.advance_status().unwrap();
        assert_eq!(task.status(), Status::Done);

        let err = task.advance_status().unwrap_err();
        assert!(matches!(err, TaskerError::InvalidState(ref m) if m.contains("already complete")));
        assert_eq!(task.status(), Status::Done);
    }

    #[test]
    fn new_task_accepts_description_change_and_delete() {
        let mut task = fresh();
        task.change_description("Updated".into()).unwrap();
        assert_eq!(task.description(), "Updated");
        task.mark_deleted().unwrap();
        assert!(task.is_deleted());
    }

    #[test]
    fn in_progress_task_rejects_edit_and_delete_unchanged() {
        let mut task = fresh();
        task.advance_status().unwrap();
        let before = task.clone();

        let err = task.change_description("Nope".into()).unwrap_err();
        assert!(matches!(err, TaskerError::InvalidState(ref m) if m.contains("in-progress")));
        let err = task.mark_deleted().unwrap_err();
        assert!(matches!(err, TaskerError::InvalidState(ref m) if m.contains("cannot delete in-progress")));

        assert_eq!(task, before);
    }

    #[test]
    fn done_task_rejects_everything_unchanged() {
        let mut task = fresh();
        task.advance_status().unwrap();
        task.advance_status().unwrap();
        let before = task.clone();

        assert!(matches!(task.advance_status(), Err(TaskerError::InvalidState(_))));
        assert!(matches!(
            task.change_description("Nope".into()),
            Err(TaskerError::InvalidState(_))
        ));
        assert!(matches!(task.mark_deleted(), Err(TaskerError::InvalidState(_))));
        assert_eq!(task, before);
    }
}
