pub mod calendar_pane;
pub mod dashboard_pane;
pub mod input_form;
pub mod kanban_pane;
pub mod keybindings;
pub mod layout;
pub mod login;
pub mod modal;
pub mod nav_bar;
pub mod pomodoro_pane;
pub mod project_pane;
pub mod styles;
pub mod timeline_pane;
pub mod todo_pane;

use crate::app::AppState;
use crate::domain::{UiMode, View};
use calendar_pane::render_calendar;
use dashboard_pane::render_dashboard;
use input_form::{render_settings_form, render_task_form};
use kanban_pane::render_kanban;
use keybindings::render_keybindings;
use layout::create_layout;
use login::render_login;
use modal::render_confirm_modal;
use nav_bar::render_nav_bar;
use pomodoro_pane::render_pomodoro;
use project_pane::render_project_detail;
use ratatui::{text::Span, widgets::Paragraph, Frame};
use styles::muted_style;
use timeline_pane::render_timeline;
use todo_pane::render_todo;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    // Nothing but the login form until someone signs in
    if !app.session.is_logged_in() {
        render_keybindings(f, UiMode::Login, app.view, layout.keybindings_area);
        render_login(f, app, layout.content_area);
        return;
    }

    render_keybindings(f, app.ui_mode, app.view, layout.keybindings_area);

    render_nav_bar(f, app, layout.nav_area);

    match app.view {
        View::Dashboard => render_dashboard(f, app, layout.content_area),
        View::ProjectDetail => render_project_detail(f, app, layout.content_area),
        View::Kanban => render_kanban(f, app, layout.content_area),
        View::Todo => render_todo(f, app, layout.content_area),
        View::Calendar => render_calendar(f, app, layout.content_area),
        View::Timeline => render_timeline(f, app, layout.content_area),
        View::Pomodoro => render_pomodoro(f, app, layout.content_area),
    }

    // Form errors are shown inside the form instead
    if app.task_form.is_none() && app.settings_form.is_none() {
        if let Some(message) = &app.status_message {
            let line = Paragraph::new(Span::styled(format!(" {}", message), muted_style()));
            f.render_widget(line, layout.status_area);
        }
    }

    match app.ui_mode {
        UiMode::ConfirmDelete => render_confirm_modal(f, app, size),
        UiMode::AddingTask => render_task_form(f, app, size),
        UiMode::EditingSettings => render_settings_form(f, app, size),
        UiMode::Login | UiMode::Normal | UiMode::Searching => {}
    }
}
