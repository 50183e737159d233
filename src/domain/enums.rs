use serde::{Deserialize, Serialize};

/// Workflow status shared by projects and tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Review,
    Done,
}

impl Status {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }

    /// Kanban column order
    pub fn all() -> &'static [Status] {
        &[Status::Todo, Status::InProgress, Status::Review, Status::Done]
    }

    /// Next column to the right, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Todo => Some(Self::InProgress),
            Self::InProgress => Some(Self::Review),
            Self::Review => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Previous column to the left, if any
    pub fn prev(&self) -> Option<Self> {
        match self {
            Self::Todo => None,
            Self::InProgress => Some(Self::Todo),
            Self::Review => Some(Self::InProgress),
            Self::Done => Some(Self::Review),
        }
    }

    /// Cycle through all statuses, wrapping at the end
    pub fn cycle(&self) -> Self {
        self.next().unwrap_or(Self::Todo)
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Top-level screen shown below the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    ProjectDetail,
    Calendar,
    Kanban,
    Todo,
    Timeline,
    Pomodoro,
}

impl View {
    /// Views reachable from the navigation bar, in tab order
    pub fn tabs() -> &'static [View] {
        &[
            View::Dashboard,
            View::Calendar,
            View::Kanban,
            View::Todo,
            View::Timeline,
            View::Pomodoro,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::ProjectDetail => "Project",
            View::Calendar => "Calendar",
            View::Kanban => "Kanban",
            View::Todo => "Todo List",
            View::Timeline => "Timeline",
            View::Pomodoro => "Pomodoro",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Login,
    Normal,
    AddingTask,
    Searching,
    ConfirmDelete,
    EditingSettings,
}

/// Todo list filter buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoFilter {
    All,
    Mine,
    Pending,
    Completed,
    High,
}

impl TodoFilter {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Mine => "Mine",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::High => "High priority",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            Self::All => Self::Mine,
            Self::Mine => Self::Pending,
            Self::Pending => Self::Completed,
            Self::Completed => Self::High,
            Self::High => Self::All,
        }
    }
}

/// Timeline window around today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Week,
    Month,
    Quarter,
    All,
}

impl TimeRange {
    /// Half-width of the window in days; `None` means unbounded
    pub fn window_days(&self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::Quarter => Some(90),
            Self::All => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Quarter => "Quarter",
            Self::All => "All",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            Self::Week => Self::Month,
            Self::Month => Self::Quarter,
            Self::Quarter => Self::All,
            Self::All => Self::Week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_status_columns() {
        assert_eq!(Status::Todo.prev(), None);
        assert_eq!(Status::Todo.next(), Some(Status::InProgress));
        assert_eq!(Status::Done.next(), None);
        assert_eq!(Status::Done.cycle(), Status::Todo);
        assert_eq!(Status::all().len(), 4);
    }

    #[test]
    fn test_status_serializes_with_label() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }

    #[test]
    fn test_time_range_windows() {
        assert_eq!(TimeRange::Week.window_days(), Some(7));
        assert_eq!(TimeRange::Month.window_days(), Some(30));
        assert_eq!(TimeRange::Quarter.window_days(), Some(90));
        assert_eq!(TimeRange::All.window_days(), None);
        assert_eq!(TimeRange::All.cycle(), TimeRange::Week);
    }

    #[test]
    fn test_todo_filter_cycle_returns_to_all() {
        let mut filter = TodoFilter::All;
        for _ in 0..5 {
            filter = filter.cycle();
        }
        assert_eq!(filter, TodoFilter::All);
    }
}
