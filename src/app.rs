use crate::config::Config;
use crate::domain::{
    Member, NewTask, Priority, ProjectId, ProjectPatch, Status, Task, TaskId, TaskPatch, TimeRange,
    TodoFilter, UiMode, View,
};
use crate::notifications;
use crate::pomodoro::{Pomodoro, PomodoroSettings, SessionCompleted, SessionKind};
use crate::error::{Error, Result};
use crate::queries::{self, ProjectFilter};
use crate::session::Session;
use crate::store::Store;
use chrono::{Duration, Local, NaiveDate};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Number of fields in the add-task form
pub const TASK_FORM_FIELDS: usize = 5;
/// Number of fields in the Pomodoro settings form
pub const SETTINGS_FORM_FIELDS: usize = 4;
/// Step for the project progress keys
pub const PROGRESS_STEP: u8 = 5;

/// Login screen input
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub editing_field: usize, // 0 = username, 1 = password
}

/// Add-task form state
#[derive(Debug, Clone)]
pub struct TaskFormState {
    pub title: String,
    /// Index into the store's projects; `None` = personal task
    pub project_index: Option<usize>,
    /// Index into `AppState::assignee_options`; `None` = unassigned
    pub assignee_index: Option<usize>,
    pub priority: Priority,
    /// Free text, YYYY-MM-DD or empty
    pub due: String,
    pub editing_field: usize, // 0 title, 1 project, 2 assignee, 3 priority, 4 due
    /// Kanban requires a project, the todo list does not
    pub require_project: bool,
}

/// One choice in the add-task form's assignee field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeOption {
    pub id: i64,
    pub label: String,
}

impl AssigneeOption {
    fn member(member: &Member) -> Self {
        Self {
            id: member.id,
            label: format!("{} ({})", member.name, member.role),
        }
    }
}

/// Pomodoro settings form; values are edited as text
#[derive(Debug, Clone)]
pub struct SettingsFormState {
    pub values: [String; SETTINGS_FORM_FIELDS],
    pub editing_field: usize,
}

impl SettingsFormState {
    pub fn labels() -> [&'static str; SETTINGS_FORM_FIELDS] {
        [
            "Work (minutes)",
            "Short break (minutes)",
            "Long break (minutes)",
            "Sessions before long break",
        ]
    }

    fn from_settings(settings: PomodoroSettings) -> Self {
        Self {
            values: [
                settings.work_minutes.to_string(),
                settings.short_break_minutes.to_string(),
                settings.long_break_minutes.to_string(),
                settings.long_break_interval.to_string(),
            ],
            editing_field: 0,
        }
    }

    /// Parse the fields, keeping `current` values for anything unparsable
    fn to_settings(&self, current: PomodoroSettings) -> PomodoroSettings {
        let parse = |idx: usize, fallback: u32| self.values[idx].trim().parse().unwrap_or(fallback);
        PomodoroSettings {
            work_minutes: parse(0, current.work_minutes),
            short_break_minutes: parse(1, current.short_break_minutes),
            long_break_minutes: parse(2, current.long_break_minutes),
            long_break_interval: parse(3, current.long_break_interval),
        }
    }
}

/// Pending delete confirmation
#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub task_id: TaskId,
    pub title: String,
}

/// Main application state
pub struct AppState {
    pub store: Store,
    pub session: Session,
    pub pomodoro: Pomodoro,
    pub config: Config,
    pub config_path: Option<PathBuf>,

    pub view: View,
    pub ui_mode: UiMode,
    pub login_form: LoginForm,
    pub task_form: Option<TaskFormState>,
    pub settings_form: Option<SettingsFormState>,
    pub confirm: Option<ConfirmState>,
    pub status_message: Option<String>,
    pub today: NaiveDate,

    // Dashboard / project detail
    pub selected_project: usize,
    pub detail_project_id: Option<ProjectId>,

    // Kanban
    pub kanban_column: usize,
    pub kanban_row: usize,

    // Todo list
    pub todo_filter: TodoFilter,
    pub todo_search: String,
    pub todo_selected: usize,

    // Calendar
    pub calendar_date: NaiveDate,

    // Timeline
    pub time_range: TimeRange,
    pub project_filter: ProjectFilter,
    pub timeline_scroll: usize,
}

impl AppState {
    pub fn new(store: Store, config: Config, config_path: Option<PathBuf>) -> Self {
        let today = Local::now().date_naive();
        let pomodoro = Pomodoro::new(config.pomodoro);

        Self {
            store,
            session: Session::new(),
            pomodoro,
            config,
            config_path,
            view: View::Dashboard,
            ui_mode: UiMode::Login,
            login_form: LoginForm::default(),
            task_form: None,
            settings_form: None,
            confirm: None,
            status_message: None,
            today,
            selected_project: 0,
            detail_project_id: None,
            kanban_column: 0,
            kanban_row: 0,
            todo_filter: TodoFilter::All,
            todo_search: String::new(),
            todo_selected: 0,
            calendar_date: today,
            time_range: TimeRange::Month,
            project_filter: ProjectFilter::All,
            timeline_scroll: 0,
        }
    }

    // ----- Session -----

    pub fn login_toggle_field(&mut self) {
        self.login_form.editing_field = (self.login_form.editing_field + 1) % 2;
    }

    pub fn login_add_char(&mut self, c: char) {
        match self.login_form.editing_field {
            0 => self.login_form.username.push(c),
            _ => self.login_form.password.push(c),
        }
    }

    pub fn login_backspace(&mut self) {
        match self.login_form.editing_field {
            0 => self.login_form.username.pop(),
            _ => self.login_form.password.pop(),
        };
    }

    /// Log in with whatever was typed
    pub fn submit_login(&mut self) {
        let form = std::mem::take(&mut self.login_form);
        self.session.login_with_credentials(&form.username, &form.password);
        self.ui_mode = UiMode::Normal;
        self.view = View::Dashboard;
        self.status_message = None;
    }

    /// Log out and return to the login screen. The timer is paused so nothing
    /// keeps counting behind the login screen.
    pub fn logout(&mut self) {
        self.pomodoro.pause();
        self.session.logout();
        self.task_form = None;
        self.settings_form = None;
        self.confirm = None;
        self.login_form = LoginForm::default();
        self.ui_mode = UiMode::Login;
    }

    // ----- Navigation -----

    pub fn switch_view(&mut self, view: View) {
        if self.view != view {
            debug!(?view, "switching view");
        }
        self.view = view;
        self.status_message = None;
    }

    /// Select the n-th navigation tab (0-based)
    pub fn switch_tab(&mut self, index: usize) {
        if let Some(view) = View::tabs().get(index) {
            self.switch_view(*view);
        }
    }

    /// Move selection up in the current view
    pub fn move_selection_up(&mut self) {
        match self.view {
            View::Dashboard => self.selected_project = self.selected_project.saturating_sub(1),
            View::Kanban => self.kanban_row = self.kanban_row.saturating_sub(1),
            View::Todo => self.todo_selected = self.todo_selected.saturating_sub(1),
            View::Timeline => self.timeline_scroll = self.timeline_scroll.saturating_sub(1),
            View::Calendar => self.move_calendar_day(-7),
            View::ProjectDetail | View::Pomodoro => {}
        }
    }

    /// Move selection down in the current view
    pub fn move_selection_down(&mut self) {
        match self.view {
            View::Dashboard => {
                if self.selected_project + 1 < self.store.projects().len() {
                    self.selected_project += 1;
                }
            }
            View::Kanban => {
                if self.kanban_row + 1 < self.kanban_column_tasks().len() {
                    self.kanban_row += 1;
                }
            }
            View::Todo => {
                if self.todo_selected + 1 < self.visible_todo_tasks().len() {
                    self.todo_selected += 1;
                }
            }
            View::Timeline => {
                if self.timeline_scroll + 1 < self.visible_timeline_events().len() {
                    self.timeline_scroll += 1;
                }
            }
            View::Calendar => self.move_calendar_day(7),
            View::ProjectDetail | View::Pomodoro => {}
        }
    }

    // ----- Dashboard / project detail -----

    pub fn open_selected_project(&mut self) {
        if let Some(project) = self.store.projects().get(self.selected_project) {
            self.detail_project_id = Some(project.id);
            self.switch_view(View::ProjectDetail);
        }
    }

    pub fn close_project_detail(&mut self) {
        self.detail_project_id = None;
        self.switch_view(View::Dashboard);
    }

    /// Nudge the shown project's progress by `delta` percent
    pub fn adjust_progress(&mut self, delta: i16) {
        let Some(id) = self.detail_project_id else {
            return;
        };
        if let Some(project) = self.store.project(id) {
            let progress = (i16::from(project.progress) + delta).clamp(0, 100) as u8;
            self.store.update_project(id, ProjectPatch::new().progress(progress));
        }
    }

    pub fn cycle_project_status(&mut self) {
        let Some(id) = self.detail_project_id else {
            return;
        };
        if let Some(project) = self.store.project(id) {
            let status = project.status.cycle();
            self.store.update_project(id, ProjectPatch::new().status(status));
        }
    }

    // ----- Kanban -----

    pub fn kanban_status(&self) -> Status {
        Status::all()[self.kanban_column.min(Status::all().len() - 1)]
    }

    pub fn kanban_column_tasks(&self) -> Vec<&Task> {
        queries::tasks_by_status(&self.store, self.kanban_status())
    }

    pub fn selected_kanban_task(&self) -> Option<TaskId> {
        self.kanban_column_tasks().get(self.kanban_row).map(|t| t.id)
    }

    pub fn kanban_column_left(&mut self) {
        self.kanban_column = self.kanban_column.saturating_sub(1);
        self.clamp_kanban_row();
    }

    pub fn kanban_column_right(&mut self) {
        if self.kanban_column + 1 < Status::all().len() {
            self.kanban_column += 1;
        }
        self.clamp_kanban_row();
    }

    /// Move the selected card one column right and keep it selected
    pub fn move_task_right(&mut self) {
        if let Some(next) = self.kanban_status().next() {
            self.move_selected_card(next);
        }
    }

    /// Move the selected card one column left and keep it selected
    pub fn move_task_left(&mut self) {
        if let Some(prev) = self.kanban_status().prev() {
            self.move_selected_card(prev);
        }
    }

    fn move_selected_card(&mut self, status: Status) {
        let Some(id) = self.selected_kanban_task() else {
            return;
        };
        self.store.update_task(id, TaskPatch::new().status(status));
        if let Some(column) = Status::all().iter().position(|s| *s == status) {
            self.kanban_column = column;
        }
        self.kanban_row = queries::index_of(&self.kanban_column_tasks(), id).unwrap_or(0);
    }

    fn clamp_kanban_row(&mut self) {
        let len = self.kanban_column_tasks().len();
        self.kanban_row = self.kanban_row.min(len.saturating_sub(1));
    }

    // ----- Todo list -----

    pub fn visible_todo_tasks(&self) -> Vec<&Task> {
        queries::filter_tasks(
            &self.store,
            self.todo_filter,
            &self.todo_search,
            self.session.current_user(),
        )
    }

    pub fn selected_todo_task(&self) -> Option<TaskId> {
        self.visible_todo_tasks().get(self.todo_selected).map(|t| t.id)
    }

    /// Toggle the selected task between Done and Todo
    pub fn toggle_selected_complete(&mut self) {
        let Some(id) = self.selected_todo_task() else {
            return;
        };
        let status = match self.store.task(id).map(|t| t.status) {
            Some(Status::Done) => Status::Todo,
            Some(_) => Status::Done,
            None => return,
        };
        self.store.update_task(id, TaskPatch::new().status(status));
        self.clamp_todo_selection();
    }

    pub fn cycle_todo_filter(&mut self) {
        self.todo_filter = self.todo_filter.cycle();
        self.clamp_todo_selection();
    }

    pub fn start_search(&mut self) {
        self.ui_mode = UiMode::Searching;
    }

    pub fn search_add_char(&mut self, c: char) {
        self.todo_search.push(c);
        self.clamp_todo_selection();
    }

    pub fn search_backspace(&mut self) {
        self.todo_search.pop();
        self.clamp_todo_selection();
    }

    /// Leave search mode; `clear` drops the search term
    pub fn end_search(&mut self, clear: bool) {
        if clear {
            self.todo_search.clear();
        }
        self.ui_mode = UiMode::Normal;
        self.clamp_todo_selection();
    }

    fn clamp_todo_selection(&mut self) {
        let len = self.visible_todo_tasks().len();
        self.todo_selected = self.todo_selected.min(len.saturating_sub(1));
    }

    // ----- Add / delete tasks -----

    /// Open the add-task form for the current view
    pub fn start_add_task(&mut self) {
        let require_project = self.view == View::Kanban;
        let project_index = if require_project && !self.store.projects().is_empty() {
            Some(0)
        } else {
            None
        };
        // Todo tasks go to the current user unless another assignee is picked
        let assignee_index = if !require_project && self.session.is_logged_in() {
            Some(0)
        } else {
            None
        };
        self.task_form = Some(TaskFormState {
            title: String::new(),
            project_index,
            assignee_index,
            priority: Priority::Medium,
            due: String::new(),
            editing_field: 0,
            require_project,
        });
        self.status_message = None;
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn task_form_next_field(&mut self) {
        if let Some(form) = &mut self.task_form {
            form.editing_field = (form.editing_field + 1) % TASK_FORM_FIELDS;
        }
    }

    pub fn task_form_prev_field(&mut self) {
        if let Some(form) = &mut self.task_form {
            form.editing_field = (form.editing_field + TASK_FORM_FIELDS - 1) % TASK_FORM_FIELDS;
        }
    }

    /// Type into the title or due date field
    pub fn task_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.task_form {
            match form.editing_field {
                0 => form.title.push(c),
                4 => form.due.push(c),
                _ => {}
            }
        }
    }

    pub fn task_form_backspace(&mut self) {
        if let Some(form) = &mut self.task_form {
            match form.editing_field {
                0 => {
                    form.title.pop();
                }
                4 => {
                    form.due.pop();
                }
                _ => {}
            }
        }
    }

    /// Assignees the add-task form can pick from.
    ///
    /// Kanban cards choose among the selected project's members. Todo tasks
    /// offer the current user first, then every member of every project.
    pub fn assignee_options(&self, form: &TaskFormState) -> Vec<AssigneeOption> {
        if form.require_project {
            return form
                .project_index
                .and_then(|i| self.store.projects().get(i))
                .map(|p| p.members.iter().map(AssigneeOption::member).collect())
                .unwrap_or_default();
        }

        let mut options = Vec::new();
        if let Some(user) = self.session.current_user() {
            options.push(AssigneeOption {
                id: user.id,
                label: format!("{} (you)", user.name),
            });
        }
        for member in self.store.projects().iter().flat_map(|p| &p.members) {
            if !options.iter().any(|o| o.id == member.id) {
                options.push(AssigneeOption::member(member));
            }
        }
        options
    }

    /// Step through the options of the project/assignee/priority fields
    pub fn task_form_cycle_option(&mut self) {
        let project_count = self.store.projects().len();
        let assignee_count = self
            .task_form
            .as_ref()
            .map_or(0, |form| self.assignee_options(form).len());
        let Some(form) = &mut self.task_form else {
            return;
        };
        match form.editing_field {
            1 => {
                form.project_index = match form.project_index {
                    None if project_count > 0 => Some(0),
                    Some(i) if i + 1 < project_count => Some(i + 1),
                    Some(_) if form.require_project && project_count > 0 => Some(0),
                    _ => None,
                };
                // Card assignees belong to the project
                if form.require_project {
                    form.assignee_index = None;
                }
            }
            2 => {
                form.assignee_index = match form.assignee_index {
                    None if assignee_count > 0 => Some(0),
                    Some(i) if i + 1 < assignee_count => Some(i + 1),
                    // A todo task always has someone responsible
                    Some(_) if !form.require_project && assignee_count > 0 => Some(0),
                    _ => None,
                };
            }
            3 => form.priority = form.priority.cycle(),
            _ => {}
        }
    }

    /// Create the task from the form. Invalid input keeps the form open with
    /// a message.
    pub fn submit_task_form(&mut self) {
        let Some(form) = self.task_form.take() else {
            return;
        };

        let title = form.title.trim();
        if title.is_empty() {
            self.status_message = Some("Title is required".to_string());
            self.task_form = Some(form);
            return;
        }
        if form.require_project && form.project_index.is_none() {
            self.status_message = Some("Choose a project".to_string());
            self.task_form = Some(form);
            return;
        }
        let due_date = match parse_due(&form.due) {
            Ok(date) => date,
            Err(e) => {
                self.status_message = Some(e.to_string());
                self.task_form = Some(form);
                return;
            }
        };

        let mut new_task = NewTask::new(title).priority(form.priority);
        if let Some(project) = form.project_index.and_then(|i| self.store.projects().get(i)) {
            new_task = new_task.project(project.id);
        }
        if let Some(option) = form
            .assignee_index
            .and_then(|i| self.assignee_options(&form).get(i).cloned())
        {
            new_task = new_task.assignee(option.id);
        }
        if let Some(date) = due_date {
            new_task = new_task.due(date);
        }

        match self.store.submit_task(new_task) {
            Ok(task) => {
                self.status_message = Some(format!("Added \"{}\"", task.title));
                self.ui_mode = UiMode::Normal;
                self.select_task(task.id);
            }
            Err(e) => {
                warn!(error = %e, "task rejected");
                self.status_message = Some(e.to_string());
                self.task_form = Some(form);
            }
        }
    }

    pub fn cancel_task_form(&mut self) {
        self.task_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Point the current view's selection at `id`, if it is visible there
    fn select_task(&mut self, id: TaskId) {
        match self.view {
            View::Kanban => {
                if let Some(column) = self
                    .store
                    .task(id)
                    .and_then(|t| Status::all().iter().position(|s| *s == t.status))
                {
                    self.kanban_column = column;
                }
                self.kanban_row = queries::index_of(&self.kanban_column_tasks(), id).unwrap_or(0);
            }
            View::Todo => {
                if let Some(idx) = queries::index_of(&self.visible_todo_tasks(), id) {
                    self.todo_selected = idx;
                }
            }
            _ => {}
        }
    }

    /// Ask for confirmation before deleting the selected task
    pub fn request_delete_selected(&mut self) {
        let id = match self.view {
            View::Kanban => self.selected_kanban_task(),
            View::Todo => self.selected_todo_task(),
            _ => None,
        };
        if let Some(task) = id.and_then(|id| self.store.task(id)) {
            self.confirm = Some(ConfirmState {
                task_id: task.id,
                title: task.title.clone(),
            });
            self.ui_mode = UiMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(confirm) = self.confirm.take() {
            self.store.delete_task(confirm.task_id);
            self.status_message = Some(format!("Deleted \"{}\"", confirm.title));
            self.clamp_kanban_row();
            self.clamp_todo_selection();
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_confirm(&mut self) {
        self.confirm = None;
        self.ui_mode = UiMode::Normal;
    }

    // ----- Calendar -----

    pub fn move_calendar_day(&mut self, days: i64) {
        if let Some(date) = self.calendar_date.checked_add_signed(Duration::days(days)) {
            self.calendar_date = date;
        }
    }

    pub fn shift_calendar_month(&mut self, delta: i32) {
        self.calendar_date = queries::shift_month(self.calendar_date, delta);
    }

    pub fn calendar_today(&mut self) {
        self.calendar_date = self.today;
    }

    // ----- Timeline -----

    pub fn visible_timeline_events(&self) -> Vec<queries::TimelineEvent> {
        queries::filter_by_range(
            queries::timeline_events(&self.store, self.project_filter),
            self.time_range,
            self.today,
        )
    }

    pub fn cycle_time_range(&mut self) {
        self.time_range = self.time_range.cycle();
        self.timeline_scroll = 0;
    }

    pub fn cycle_project_filter(&mut self) {
        self.project_filter = self.project_filter.cycle(self.store.projects());
        self.timeline_scroll = 0;
    }

    // ----- Pomodoro -----

    pub fn toggle_pomodoro(&mut self) {
        self.pomodoro.toggle();
    }

    pub fn reset_pomodoro(&mut self) {
        self.pomodoro.reset();
    }

    pub fn skip_pomodoro(&mut self) {
        let event = self.pomodoro.skip();
        self.on_session_completed(event);
    }

    pub fn select_session(&mut self, kind: SessionKind) {
        self.pomodoro.select_session(kind);
    }

    pub fn open_settings(&mut self) {
        self.settings_form = Some(SettingsFormState::from_settings(self.pomodoro.settings()));
        self.status_message = None;
        self.ui_mode = UiMode::EditingSettings;
    }

    pub fn settings_next_field(&mut self) {
        if let Some(form) = &mut self.settings_form {
            form.editing_field = (form.editing_field + 1) % SETTINGS_FORM_FIELDS;
        }
    }

    pub fn settings_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.settings_form {
            if c.is_ascii_digit() && form.values[form.editing_field].len() < 3 {
                form.values[form.editing_field].push(c);
            }
        }
    }

    pub fn settings_backspace(&mut self) {
        if let Some(form) = &mut self.settings_form {
            form.values[form.editing_field].pop();
        }
    }

    /// Apply the edited settings to the timer and write them to the config file
    pub fn save_settings(&mut self) {
        let Some(form) = self.settings_form.take() else {
            return;
        };
        let settings = form.to_settings(self.pomodoro.settings());
        self.pomodoro.apply_settings(settings);
        self.config.pomodoro = self.pomodoro.settings();
        self.ui_mode = UiMode::Normal;

        if let Some(path) = &self.config_path {
            match self.config.save(path) {
                Ok(()) => info!(path = %path.display(), "settings saved"),
                Err(e) => {
                    warn!(error = %e, "could not save settings");
                    self.status_message = Some(format!("Settings applied but not saved: {}", e));
                }
            }
        }
    }

    pub fn cancel_settings(&mut self) {
        self.settings_form = None;
        self.ui_mode = UiMode::Normal;
    }

    fn on_session_completed(&mut self, event: SessionCompleted) {
        notifications::notify_session_complete(&event);
        self.status_message = Some(notifications::completion_message(&event));
    }

    /// Called once per event loop iteration
    pub fn tick(&mut self) {
        self.today = Local::now().date_naive();
        if let Some(event) = self.pomodoro.tick() {
            self.on_session_completed(event);
        }
    }

    /// Stop the timer before the app exits
    pub fn shutdown(&mut self) {
        self.pomodoro.pause();
        info!(
            completed = self.pomodoro.completed_work_count(),
            "shutting down"
        );
    }
}

/// Empty means no due date
fn parse_due(input: &str) -> Result<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| Error::InvalidDate(input.to_string()))
}
