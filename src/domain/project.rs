use super::enums::Status;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ProjectId = i64;
pub type MemberId = i64;

/// Team member attached to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub avatar: String,
    pub role: String,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: String::new(),
            role: role.into(),
        }
    }
}

/// Free-form "what's happening now" line shown on a project.
///
/// Not linked to the task collection by id; it is a denormalized highlight
/// that is never reconciled with tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentTaskSummary {
    pub task: String,
    pub assignee: String,
    pub due_date: NaiveDate,
}

/// A project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    /// Image reference (URL or path), only displayed
    pub image: String,
    /// Completion percent, 0..=100. Set by hand, never derived from tasks.
    pub progress: u8,
    pub due_date: NaiveDate,
    pub status: Status,
    pub members: Vec<Member>,
    pub current_tasks: Vec<CurrentTaskSummary>,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            image: String::new(),
            progress: 0,
            due_date,
            status: Status::Todo,
            members: Vec::new(),
            current_tasks: Vec::new(),
        }
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// First member, shown as the project's owner on the timeline
    pub fn lead(&self) -> Option<&Member> {
        self.members.first()
    }

    pub fn is_complete(&self) -> bool {
        self.progress == 100
    }

    pub fn is_in_progress(&self) -> bool {
        self.progress > 0 && self.progress < 100
    }
}

/// Partial update for a project; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub progress: Option<u8>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<Status>,
    pub members: Option<Vec<Member>>,
    pub current_tasks: Option<Vec<CurrentTaskSummary>>,
}

impl ProjectPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Merge the set fields into `project`
    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(image) = self.image {
            project.image = image;
        }
        if let Some(progress) = self.progress {
            project.progress = progress.min(100);
        }
        if let Some(due_date) = self.due_date {
            project.due_date = due_date;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(members) = self.members {
            project.members = members;
        }
        if let Some(current_tasks) = self.current_tasks {
            project.current_tasks = current_tasks;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut project = Project::new(1, "Platform", date(2024, 3, 15));
        project.description = "Original".to_string();

        ProjectPatch::new().status(Status::Review).progress(60).apply(&mut project);

        assert_eq!(project.status, Status::Review);
        assert_eq!(project.progress, 60);
        assert_eq!(project.description, "Original");
        assert_eq!(project.name, "Platform");
    }

    #[test]
    fn test_patch_clamps_progress() {
        let mut project = Project::new(1, "Platform", date(2024, 3, 15));
        ProjectPatch::new().progress(250).apply(&mut project);
        assert_eq!(project.progress, 100);
        assert!(project.is_complete());
    }

    #[test]
    fn test_member_lookup() {
        let mut project = Project::new(1, "Platform", date(2024, 3, 15));
        project.members.push(Member::new(2, "Ann", "Frontend Developer"));
        project.members.push(Member::new(3, "Bo", "Backend Developer"));

        assert_eq!(project.member(3).map(|m| m.name.as_str()), Some("Bo"));
        assert!(project.member(9).is_none());
        assert_eq!(project.lead().map(|m| m.id), Some(2));
    }
}
