use crate::app::{AppState, SettingsFormState, TaskFormState};
use crate::queries::{PERSONAL_TASK, UNASSIGNED};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Label line plus value line for one form field
fn field_lines(label: &str, value: String, editing: bool, is_choice: bool) -> [Line<'static>; 2] {
    let label = if editing {
        format!("{}: (editing)", label)
    } else {
        format!("{}:", label)
    };
    let cursor = match (editing, is_choice) {
        (true, false) => Span::styled("█", modal_title_style()),
        (true, true) => Span::styled("  ◀ ▶", modal_title_style()),
        _ => Span::raw(""),
    };
    [
        Line::raw(label),
        Line::from(vec![Span::raw("> "), Span::styled(value, modal_title_style()), cursor]),
    ]
}

fn task_form_lines(app: &AppState, form: &TaskFormState) -> Vec<Line<'static>> {
    let project_name = form
        .project_index
        .and_then(|i| app.store.projects().get(i))
        .map_or_else(|| PERSONAL_TASK.to_string(), |p| p.name.clone());
    let assignee = form
        .assignee_index
        .and_then(|i| app.assignee_options(form).into_iter().nth(i))
        .map_or_else(|| UNASSIGNED.to_string(), |o| o.label);
    let due = if form.due.is_empty() && form.editing_field != 4 {
        "none".to_string()
    } else {
        form.due.clone()
    };

    let mut lines = vec![Line::raw("")];
    let fields = [
        ("Title", form.title.clone(), false),
        ("Project", project_name, true),
        ("Assignee", assignee, true),
        ("Priority", form.priority.label().to_string(), true),
        ("Due date (YYYY-MM-DD)", due, false),
    ];
    for (idx, (label, value, is_choice)) in fields.into_iter().enumerate() {
        lines.extend(field_lines(label, value, form.editing_field == idx, is_choice));
    }
    lines
}

fn settings_form_lines(form: &SettingsFormState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw("")];
    for (idx, label) in SettingsFormState::labels().iter().enumerate() {
        lines.extend(field_lines(
            label,
            form.values[idx].clone(),
            form.editing_field == idx,
            false,
        ));
    }
    lines
}

fn render_form(f: &mut Frame, app: &AppState, area: Rect, title: &'static str, mut lines: Vec<Line<'static>>) {
    let modal_area = create_modal_area(area, lines.len() as u16 + 6);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    lines.push(Line::raw(""));
    if let Some(message) = &app.status_message {
        lines.push(Line::from(Span::styled(message.clone(), error_style())));
    }
    lines.push(Line::from(Span::styled(
        "Tab to switch fields  ·  Enter to save  ·  Esc to cancel",
        hint_style(),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the add-task form
pub fn render_task_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.task_form {
        let title = if form.require_project {
            " Add Card "
        } else {
            " Add Task "
        };
        render_form(f, app, area, title, task_form_lines(app, form));
    }
}

/// Render the Pomodoro settings form
pub fn render_settings_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.settings_form {
        render_form(f, app, area, " Pomodoro Settings ", settings_form_lines(form));
    }
}
