use crate::app::AppState;
use crate::domain::{Status, Task};
use crate::queries;
use crate::ui::layout::columns;
use crate::ui::styles::{
    border_style, default_style, focused_border_style, muted_style, overdue_style,
    priority_marker, selected_style, status_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

fn card<'a>(app: &AppState, task: &'a Task) -> ListItem<'a> {
    let due = match task.due_date {
        Some(d) if queries::is_overdue(d, app.today) && !task.is_done() => {
            Span::styled(d.format(" %d %b").to_string(), overdue_style())
        }
        Some(d) => Span::styled(d.format(" %d %b").to_string(), muted_style()),
        None => Span::raw(""),
    };
    ListItem::new(vec![
        Line::from(vec![
            Span::raw(format!("{} ", priority_marker(task.priority, app.config.use_emoji))),
            Span::styled(task.title.as_str(), default_style()),
        ]),
        Line::from(vec![
            Span::styled(
                format!("  {}", queries::project_label(&app.store, task.project_id)),
                muted_style(),
            ),
            due,
        ]),
        Line::from(Span::styled(
            format!("  {}", queries::assignee_label(&app.store, task.assignee_id)),
            muted_style(),
        )),
    ])
}

/// Render the four status columns
pub fn render_kanban(f: &mut Frame, app: &AppState, area: Rect) {
    let areas = columns(area, Status::all().len() as u32);

    for (idx, (status, column_area)) in Status::all().iter().zip(areas).enumerate() {
        let tasks = queries::tasks_by_status(&app.store, *status);
        let focused = idx == app.kanban_column;

        let title = Span::styled(
            format!(" {} ({}) ", status.label(), tasks.len()),
            status_style(*status),
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused { focused_border_style() } else { border_style() })
            .title(title);

        let items: Vec<ListItem> = tasks.iter().map(|task| card(app, task)).collect();
        let mut state = ListState::default();
        if focused && !items.is_empty() {
            state.select(Some(app.kanban_row));
        }

        let list = List::new(items).block(block).highlight_style(selected_style());
        f.render_stateful_widget(list, column_area, &mut state);
    }
}
