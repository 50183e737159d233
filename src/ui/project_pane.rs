use crate::app::AppState;
use crate::queries;
use crate::ui::dashboard_pane::progress_bar;
use crate::ui::styles::{
    border_style, default_style, done_style, error_style, muted_style, overdue_style,
    priority_marker, status_style, title_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn pane(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(format!(" {} ", title), title_style()))
}

/// Render the detail page of the project opened from the dashboard
pub fn render_project_detail(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(project) = app.detail_project_id.and_then(|id| app.store.project(id)) else {
        let message = Paragraph::new("Project not found. Press Esc to go back.").style(error_style());
        f.render_widget(message, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[1]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(bottom[0]);

    // Overview
    let overview = vec![
        Line::from(Span::styled(project.description.clone(), default_style())),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Status   ", muted_style()),
            Span::styled(project.status.label(), status_style(project.status)),
        ]),
        Line::from(vec![
            Span::styled("Progress ", muted_style()),
            Span::styled(progress_bar(project.progress, 30), status_style(project.status)),
        ]),
        Line::from(vec![
            Span::styled("Due      ", muted_style()),
            Span::raw(project.due_date.format("%d %b %Y").to_string()),
        ]),
    ];
    f.render_widget(
        Paragraph::new(overview)
            .wrap(Wrap { trim: true })
            .block(pane(&project.name)),
        rows[0],
    );

    // Members
    let members: Vec<Line> = project
        .members
        .iter()
        .map(|m| {
            Line::from(vec![
                Span::styled(format!(" {}", m.name), default_style()),
                Span::styled(format!("  {}", m.role), muted_style()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(members).block(pane("Team")), left[0]);

    // Current task summaries
    let current: Vec<Line> = project
        .current_tasks
        .iter()
        .map(|summary| {
            Line::from(vec![
                Span::styled(format!(" {}", summary.task), default_style()),
                Span::styled(
                    format!("  {} · {}", summary.assignee, summary.due_date.format("%d %b")),
                    muted_style(),
                ),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(current).block(pane("Current work")), left[1]);

    // Tasks belonging to this project
    let tasks: Vec<Line> = app
        .store
        .tasks_for_project(project.id)
        .map(|task| {
            let name_style = if task.is_done() { done_style() } else { default_style() };
            let due = match task.due_date {
                Some(d) if queries::is_overdue(d, app.today) && !task.is_done() => {
                    Span::styled(format!("  {}", d.format("%Y-%m-%d")), overdue_style())
                }
                Some(d) => Span::styled(format!("  {}", d.format("%Y-%m-%d")), muted_style()),
                None => Span::raw(""),
            };
            Line::from(vec![
                Span::raw(format!(" {} ", priority_marker(task.priority, app.config.use_emoji))),
                Span::styled(task.title.clone(), name_style),
                Span::styled(format!("  [{}]", task.status.label()), status_style(task.status)),
                Span::styled(
                    format!("  {}", queries::assignee_label(&app.store, task.assignee_id)),
                    muted_style(),
                ),
                due,
            ])
        })
        .collect();
    let tasks = if tasks.is_empty() {
        vec![Line::from(Span::styled(" No tasks yet", muted_style()))]
    } else {
        tasks
    };
    f.render_widget(Paragraph::new(tasks).block(pane("Tasks")), bottom[1]);
}
