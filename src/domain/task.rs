use super::enums::{Priority, Status};
use super::project::{MemberId, ProjectId};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub type TaskId = i64;

/// A task, either attached to a project or personal (`project_id == None`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub project_id: Option<ProjectId>,
    pub assignee_id: Option<MemberId>,
    pub status: Status,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    /// Set when the task is created at runtime; seeded tasks have none
    pub created_at: Option<DateTime<Local>>,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }

    /// Progress shown on the timeline for a task
    pub fn progress(&self) -> u8 {
        match self.status {
            Status::Done => 100,
            Status::InProgress => 50,
            _ => 0,
        }
    }
}

/// Fields supplied when creating a task; id and timestamp are assigned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub project_id: Option<ProjectId>,
    pub assignee_id: Option<MemberId>,
    pub status: Status,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            project_id: None,
            assignee_id: None,
            status: Status::Todo,
            priority: Priority::Medium,
            due_date: None,
        }
    }

    pub fn project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn due(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub(crate) fn into_task(self, id: TaskId, created_at: DateTime<Local>) -> Task {
        Task {
            id,
            title: self.title,
            project_id: self.project_id,
            assignee_id: self.assignee_id,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            created_at: Some(created_at),
        }
    }
}

/// Partial update for a task. Nullable fields use `Option<Option<_>>`
/// so a patch can clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub project_id: Option<Option<ProjectId>>,
    pub assignee_id: Option<Option<MemberId>>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Merge the set fields into `task`
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(project_id) = self.project_id {
            task.project_id = project_id;
        }
        if let Some(assignee_id) = self.assignee_id {
            task.assignee_id = assignee_id;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_task_defaults() {
        let task = NewTask::new("Write docs").into_task(7, Local::now());
        assert_eq!(task.id, 7);
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.project_id, None);
        assert!(task.created_at.is_some());
    }

    #[test]
    fn test_patch_can_clear_nullable_fields() {
        let mut task = NewTask::new("Setup CI")
            .project(1)
            .assignee(3)
            .due(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap())
            .into_task(1, Local::now());

        let patch = TaskPatch {
            project_id: Some(None),
            due_date: Some(None),
            ..TaskPatch::default()
        };
        patch.apply(&mut task);

        assert_eq!(task.project_id, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.assignee_id, Some(3));
    }

    #[test]
    fn test_task_progress_by_status() {
        let mut task = NewTask::new("x").into_task(1, Local::now());
        assert_eq!(task.progress(), 0);
        task.status = Status::InProgress;
        assert_eq!(task.progress(), 50);
        task.status = Status::Review;
        assert_eq!(task.progress(), 0);
        task.status = Status::Done;
        assert_eq!(task.progress(), 100);
    }
}
