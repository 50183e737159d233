use crate::domain::{NewTask, Project, ProjectId, ProjectPatch, Task, TaskId, TaskPatch};
use crate::error::{Error, Result};
use chrono::Local;
use tracing::{debug, info, warn};

/// Decides whether a new task's project/assignee references are acceptable
pub trait ReferencePolicy {
    fn admit(&self, projects: &[Project], task: &NewTask) -> Result<()>;
}

/// Accepts any reference, including ids that point at nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Permissive;

impl ReferencePolicy for Permissive {
    fn admit(&self, _projects: &[Project], _task: &NewTask) -> Result<()> {
        Ok(())
    }
}

/// Requires the project to exist and the assignee to be a member of some project
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

impl ReferencePolicy for Strict {
    fn admit(&self, projects: &[Project], task: &NewTask) -> Result<()> {
        if let Some(project_id) = task.project_id {
            if !projects.iter().any(|p| p.id == project_id) {
                return Err(Error::UnknownProject(project_id));
            }
        }
        if let Some(assignee_id) = task.assignee_id {
            if !projects.iter().any(|p| p.member(assignee_id).is_some()) {
                return Err(Error::UnknownAssignee(assignee_id));
            }
        }
        Ok(())
    }
}

/// Hands out time-derived task ids (epoch milliseconds) that stay strictly
/// increasing even when several tasks are created in the same millisecond
#[derive(Debug, Clone, Default)]
pub struct TaskIdGenerator {
    last: TaskId,
}

impl TaskIdGenerator {
    /// Start above every id already in use
    pub fn after(existing: impl IntoIterator<Item = TaskId>) -> Self {
        Self {
            last: existing.into_iter().max().unwrap_or(0),
        }
    }

    pub fn next_at(&mut self, now_millis: i64) -> TaskId {
        let id = now_millis.max(self.last + 1);
        self.last = id;
        id
    }

    pub fn next(&mut self) -> TaskId {
        self.next_at(Local::now().timestamp_millis())
    }
}

/// Ids must be positive; anything else is treated as malformed input
fn is_valid_id(id: i64) -> bool {
    id > 0
}

/// Projects and tasks for the app session. Nothing here is persisted.
pub struct Store {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    ids: TaskIdGenerator,
    policy: Box<dyn ReferencePolicy>,
}

impl Store {
    pub fn new(projects: Vec<Project>, tasks: Vec<Task>) -> Self {
        let ids = TaskIdGenerator::after(tasks.iter().map(|t| t.id));
        Self {
            projects,
            tasks,
            ids,
            policy: Box::new(Permissive),
        }
    }

    /// Swap the reference policy used by `submit_task`
    pub fn with_policy(mut self, policy: impl ReferencePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks_for_project(&self, id: ProjectId) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.project_id == Some(id))
    }

    /// Merge `patch` into the project with `id`. Unknown ids are ignored.
    pub fn update_project(&mut self, id: ProjectId, patch: ProjectPatch) {
        if !is_valid_id(id) {
            warn!(id, "ignoring project update with malformed id");
            return;
        }
        match self.projects.iter_mut().find(|p| p.id == id) {
            Some(project) => {
                patch.apply(project);
                debug!(id, "project updated");
            }
            None => debug!(id, "project update for unknown id ignored"),
        }
    }

    /// Merge `patch` into the task with `id`. Unknown ids are ignored.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) {
        if !is_valid_id(id) {
            warn!(id, "ignoring task update with malformed id");
            return;
        }
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                patch.apply(task);
                debug!(id, "task updated");
            }
            None => debug!(id, "task update for unknown id ignored"),
        }
    }

    /// Append a task with a fresh id and creation timestamp.
    /// References are not checked.
    pub fn add_task(&mut self, new: NewTask) -> Task {
        let id = self.ids.next();
        let task = new.into_task(id, Local::now());
        info!(id, title = %task.title, "task added");
        self.tasks.push(task.clone());
        task
    }

    /// Add a task after running it past the reference policy
    pub fn submit_task(&mut self, new: NewTask) -> Result<Task> {
        self.policy.admit(&self.projects, &new)?;
        Ok(self.add_task(new))
    }

    /// Remove the task with `id`. Unknown ids are ignored.
    pub fn delete_task(&mut self, id: TaskId) {
        if !is_valid_id(id) {
            warn!(id, "ignoring task delete with malformed id");
            return;
        }
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() < before {
            info!(id, "task deleted");
        }
    }
}
