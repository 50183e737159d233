use crate::domain::{
    MemberId, Priority, Project, ProjectId, Status, Task, TaskId, TimeRange, TodoFilter, User,
};
use crate::store::Store;
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

/// Label for tasks without a project
pub const PERSONAL_TASK: &str = "Personal task";
pub const UNKNOWN_PROJECT: &str = "Unknown project";
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Project,
    Task,
}

/// A deadline falling on a calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub kind: EventKind,
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
}

/// Deadlines due exactly on `date`: project deadlines first, then tasks
pub fn events_on(store: &Store, date: NaiveDate) -> Vec<CalendarEvent> {
    let projects = store
        .projects()
        .iter()
        .filter(|p| p.due_date == date)
        .map(|p| CalendarEvent {
            kind: EventKind::Project,
            id: p.id,
            title: p.name.clone(),
            date,
        });
    let tasks = store
        .tasks()
        .iter()
        .filter(|t| t.due_date == Some(date))
        .map(|t| CalendarEvent {
            kind: EventKind::Task,
            id: t.id,
            title: t.title.clone(),
            date,
        });
    projects.chain(tasks).collect()
}

/// Cells for a Sunday-first month grid: `None` for the leading blanks,
/// then one entry per day of the month
pub fn month_grid(year: i32, month: u32) -> Vec<Option<u32>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(first);

    let mut cells = vec![None; leading];
    cells.extend((1..=days).map(Some));
    cells
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Move by whole months, clamping the day to the target month's length
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let shifted = if delta >= 0 {
        date.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Projects due on or after `today`, soonest first
pub fn upcoming_projects(store: &Store, today: NaiveDate, limit: usize) -> Vec<&Project> {
    let mut projects: Vec<&Project> = store
        .projects()
        .iter()
        .filter(|p| p.due_date >= today)
        .collect();
    projects.sort_by_key(|p| p.due_date);
    projects.truncate(limit);
    projects
}

/// Dated tasks due on or after `today`, soonest first
pub fn upcoming_tasks(store: &Store, today: NaiveDate, limit: usize) -> Vec<&Task> {
    let mut tasks: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| t.due_date.is_some_and(|d| d >= today))
        .collect();
    tasks.sort_by_key(|t| t.due_date);
    tasks.truncate(limit);
    tasks
}

pub fn is_overdue(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

/// Which projects the timeline shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFilter {
    All,
    Only(ProjectId),
}

impl ProjectFilter {
    fn matches(&self, project_id: Option<ProjectId>) -> bool {
        match self {
            Self::All => true,
            // Personal tasks only show under "all"
            Self::Only(id) => project_id == Some(*id),
        }
    }

    /// Step through All -> each project -> All
    pub fn cycle(&self, projects: &[Project]) -> Self {
        match self {
            Self::All => projects.first().map_or(Self::All, |p| Self::Only(p.id)),
            Self::Only(id) => {
                let pos = projects.iter().position(|p| p.id == *id);
                match pos.and_then(|i| projects.get(i + 1)) {
                    Some(next) => Self::Only(next.id),
                    None => Self::All,
                }
            }
        }
    }
}

/// One row on the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    pub kind: EventKind,
    pub id: i64,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub progress: u8,
    pub status: Status,
    pub assignee: String,
    pub priority: Option<Priority>,
}

/// Project and task events for the timeline, sorted by date (undated last)
pub fn timeline_events(store: &Store, filter: ProjectFilter) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = store
        .projects()
        .iter()
        .filter(|p| filter.matches(Some(p.id)))
        .map(|p| TimelineEvent {
            kind: EventKind::Project,
            id: p.id,
            title: p.name.clone(),
            date: Some(p.due_date),
            description: p.description.clone(),
            progress: p.progress,
            status: p.status,
            assignee: p.lead().map_or_else(|| UNASSIGNED.to_string(), |m| m.name.clone()),
            priority: None,
        })
        .collect();

    events.extend(
        store
            .tasks()
            .iter()
            .filter(|t| filter.matches(t.project_id))
            .map(|t| {
                let project = t.project_id.and_then(|id| store.project(id));
                let assignee = project
                    .zip(t.assignee_id)
                    .and_then(|(p, id)| p.member(id))
                    .map_or_else(|| UNASSIGNED.to_string(), |m| m.name.clone());
                TimelineEvent {
                    kind: EventKind::Task,
                    id: t.id,
                    title: t.title.clone(),
                    date: t.due_date,
                    description: project
                        .map_or_else(|| PERSONAL_TASK.to_string(), |p| p.name.clone()),
                    progress: t.progress(),
                    status: t.status,
                    assignee,
                    priority: Some(t.priority),
                }
            }),
    );

    // `None` sorts before `Some`, so key on (is_none, date) to push undated last
    events.sort_by_key(|e| (e.date.is_none(), e.date));
    events
}

/// Keep events within the range's window around `today` (inclusive).
/// Undated events only survive the unbounded range.
pub fn filter_by_range(
    events: Vec<TimelineEvent>,
    range: TimeRange,
    today: NaiveDate,
) -> Vec<TimelineEvent> {
    let Some(window) = range.window_days() else {
        return events;
    };
    events
        .into_iter()
        .filter(|e| {
            e.date.is_some_and(|d| {
                let diff = (d - today).num_days();
                (-window..=window).contains(&diff)
            })
        })
        .collect()
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_projects: usize,
    pub completed_projects: usize,
    pub in_progress_projects: usize,
    pub average_progress: u8,
}

pub fn dashboard_stats(store: &Store) -> DashboardStats {
    let projects = store.projects();
    let total = projects.len();
    let average = if total == 0 {
        0
    } else {
        let sum: u32 = projects.iter().map(|p| u32::from(p.progress)).sum();
        (f64::from(sum) / total as f64).round() as u8
    };
    DashboardStats {
        total_projects: total,
        completed_projects: projects.iter().filter(|p| p.is_complete()).count(),
        in_progress_projects: projects.iter().filter(|p| p.is_in_progress()).count(),
        average_progress: average,
    }
}

/// Tasks in one Kanban column, in store order
pub fn tasks_by_status(store: &Store, status: Status) -> Vec<&Task> {
    store.tasks().iter().filter(|t| t.status == status).collect()
}

/// Todo list: filter button plus case-insensitive title search
pub fn filter_tasks<'a>(
    store: &'a Store,
    filter: TodoFilter,
    search: &str,
    user: Option<&User>,
) -> Vec<&'a Task> {
    let needle = search.to_lowercase();
    store
        .tasks()
        .iter()
        .filter(|t| t.title.to_lowercase().contains(&needle))
        .filter(|t| match filter {
            TodoFilter::All => true,
            TodoFilter::Mine => user.is_some_and(|u| t.assignee_id == Some(u.id)),
            TodoFilter::Pending => t.status != Status::Done,
            TodoFilter::Completed => t.status == Status::Done,
            TodoFilter::High => t.priority == Priority::High,
        })
        .collect()
}

/// Name of a task's project, falling back to placeholders for personal
/// tasks and dangling ids
pub fn project_label(store: &Store, project_id: Option<ProjectId>) -> String {
    match project_id {
        None => PERSONAL_TASK.to_string(),
        Some(id) => store
            .project(id)
            .map_or_else(|| UNKNOWN_PROJECT.to_string(), |p| p.name.clone()),
    }
}

/// Name of the first member with this id across all projects
pub fn assignee_label(store: &Store, assignee_id: Option<MemberId>) -> String {
    assignee_id
        .and_then(|id| store.projects().iter().find_map(|p| p.member(id)))
        .map_or_else(|| UNASSIGNED.to_string(), |m| m.name.clone())
}

/// Position of a task id within a list, used to keep selection stable
pub fn index_of(tasks: &[&Task], id: TaskId) -> Option<usize> {
    tasks.iter().position(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Member, NewTask};
    use crate::seed::mock_store;
    use crate::session::mock_user;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_events_on_project_due_date() {
        let store = mock_store();
        let events = events_on(&store, date(2024, 3, 15));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Project);
        assert_eq!(events[0].title, "E-commerce Platform");

        assert!(events_on(&store, date(2024, 3, 16)).is_empty());
    }

    #[test]
    fn test_events_on_lists_projects_before_tasks() {
        let mut store = mock_store();
        store.add_task(NewTask::new("Launch checklist").due(date(2024, 3, 15)));
        let events = events_on(&store, date(2024, 3, 15));
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Project, EventKind::Task]);
    }

    #[test]
    fn test_month_grid_leading_blanks() {
        // March 1st 2024 is a Friday
        let grid = month_grid(2024, 3);
        assert_eq!(grid.iter().take_while(|c| c.is_none()).count(), 5);
        assert_eq!(grid.iter().flatten().count(), 31);

        let feb = month_grid(2024, 2);
        assert_eq!(feb.iter().flatten().last(), Some(&29));

        assert!(month_grid(2024, 13).is_empty());
    }

    #[test]
    fn test_shift_month_clamps_day() {
        assert_eq!(shift_month(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(shift_month(date(2024, 3, 15), -3), date(2023, 12, 15));
        assert_eq!(shift_month(date(2024, 3, 15), 0), date(2024, 3, 15));
    }

    #[test]
    fn test_upcoming_sorted_and_limited() {
        let store = mock_store();
        let today = date(2024, 2, 20);

        let projects = upcoming_projects(&store, today, 5);
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Data Analytics Dashboard", "E-commerce Platform", "Mobile Banking App"]
        );

        let tasks = upcoming_tasks(&store, today, 1);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Design Homepage");
    }

    #[test]
    fn test_week_window_is_inclusive() {
        let mut store = Store::new(Vec::new(), Vec::new());
        let today = date(2024, 5, 1);
        store.add_task(NewTask::new("in 7 days").due(date(2024, 5, 8)));
        store.add_task(NewTask::new("in 8 days").due(date(2024, 5, 9)));
        store.add_task(NewTask::new("7 days ago").due(date(2024, 4, 24)));
        store.add_task(NewTask::new("8 days ago").due(date(2024, 4, 23)));
        store.add_task(NewTask::new("undated"));

        let events = timeline_events(&store, ProjectFilter::All);
        assert_eq!(events.last().map(|e| e.title.as_str()), Some("undated"));

        let week = filter_by_range(events.clone(), TimeRange::Week, today);
        let titles: Vec<&str> = week.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["7 days ago", "in 7 days"]);

        let all = filter_by_range(events, TimeRange::All, today);
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_timeline_task_details() {
        let mut store = mock_store();
        store.add_task(NewTask::new("Dentist").due(date(2024, 2, 1)));

        let events = timeline_events(&store, ProjectFilter::All);
        assert_eq!(events[0].title, "Dentist");
        assert_eq!(events[0].description, PERSONAL_TASK);
        assert_eq!(events[0].assignee, UNASSIGNED);

        let design = events.iter().find(|e| e.title == "Design Homepage").unwrap();
        assert_eq!(design.kind, EventKind::Task);
        assert_eq!(design.description, "E-commerce Platform");
        assert_eq!(design.assignee, "Somying Rakngan");
        assert_eq!(design.progress, 50);

        let project = events.iter().find(|e| e.kind == EventKind::Project).unwrap();
        assert_eq!(project.assignee, "Data Wikhro");
    }

    #[test]
    fn test_timeline_project_filter_excludes_personal() {
        let mut store = mock_store();
        store.add_task(NewTask::new("Dentist"));

        let events = timeline_events(&store, ProjectFilter::Only(2));
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["User Authentication", "Mobile Banking App"]);
    }

    #[test]
    fn test_project_filter_cycle() {
        let store = mock_store();
        let projects = store.projects();
        let mut filter = ProjectFilter::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            filter = filter.cycle(projects);
            seen.push(filter);
        }
        assert_eq!(
            seen,
            vec![
                ProjectFilter::Only(1),
                ProjectFilter::Only(2),
                ProjectFilter::Only(3),
                ProjectFilter::All
            ]
        );
    }

    #[test]
    fn test_dashboard_stats() {
        let store = mock_store();
        let stats = dashboard_stats(&store);
        assert_eq!(
            stats,
            DashboardStats {
                total_projects: 3,
                completed_projects: 0,
                in_progress_projects: 3,
                average_progress: 70,
            }
        );

        let empty = dashboard_stats(&Store::new(Vec::new(), Vec::new()));
        assert_eq!(empty.average_progress, 0);
    }

    #[test]
    fn test_tasks_by_status() {
        let store = mock_store();
        assert_eq!(tasks_by_status(&store, Status::InProgress).len(), 2);
        assert_eq!(tasks_by_status(&store, Status::Todo).len(), 0);
    }

    #[test]
    fn test_filter_tasks() {
        let mut store = mock_store();
        store.add_task(NewTask::new("Personal errand").assignee(1));
        let user = mock_user("me");

        assert_eq!(filter_tasks(&store, TodoFilter::All, "", None).len(), 5);
        assert_eq!(filter_tasks(&store, TodoFilter::Mine, "", Some(&user)).len(), 1);
        assert_eq!(filter_tasks(&store, TodoFilter::Mine, "", None).len(), 0);
        assert_eq!(filter_tasks(&store, TodoFilter::Completed, "", None).len(), 1);
        assert_eq!(filter_tasks(&store, TodoFilter::Pending, "", None).len(), 4);
        assert_eq!(filter_tasks(&store, TodoFilter::High, "", None).len(), 2);
        assert_eq!(filter_tasks(&store, TodoFilter::All, "DATA", None).len(), 2);
        assert_eq!(filter_tasks(&store, TodoFilter::High, "design", None).len(), 1);
    }

    #[test]
    fn test_labels() {
        let mut store = mock_store();
        store.update_project(
            1,
            crate::domain::ProjectPatch {
                members: Some(vec![Member::new(2, "Ann", "Dev")]),
                ..Default::default()
            },
        );
        assert_eq!(project_label(&store, Some(1)), "E-commerce Platform");
        assert_eq!(project_label(&store, None), PERSONAL_TASK);
        assert_eq!(project_label(&store, Some(42)), UNKNOWN_PROJECT);
        assert_eq!(assignee_label(&store, Some(2)), "Ann");
        assert_eq!(assignee_label(&store, Some(99)), UNASSIGNED);
        assert_eq!(assignee_label(&store, None), UNASSIGNED);
    }

    #[test]
    fn test_overdue_and_today() {
        let today = date(2024, 2, 20);
        assert!(is_overdue(date(2024, 2, 19), today));
        assert!(!is_overdue(today, today));
        assert!(is_today(today, today));
    }
}
