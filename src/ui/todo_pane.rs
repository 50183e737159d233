use crate::app::AppState;
use crate::domain::{TodoFilter, UiMode};
use crate::queries;
use crate::ui::styles::{
    active_tab_style, border_style, default_style, done_style, modal_title_style, muted_style,
    overdue_style, priority_marker, priority_style, selected_style, title_style, today_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

const FILTERS: [TodoFilter; 5] = [
    TodoFilter::All,
    TodoFilter::Mine,
    TodoFilter::Pending,
    TodoFilter::Completed,
    TodoFilter::High,
];

/// Render the todo list with its filter and search bar
pub fn render_todo(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    // Filter buttons and search
    let mut spans = Vec::new();
    for filter in FILTERS {
        let label = format!(" {} ", filter.label());
        if filter == app.todo_filter {
            spans.push(Span::styled(label, active_tab_style()));
        } else {
            spans.push(Span::styled(label, muted_style()));
        }
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("  Search: ", muted_style()));
    spans.push(Span::styled(app.todo_search.as_str(), modal_title_style()));
    if app.ui_mode == UiMode::Searching {
        spans.push(Span::styled("█", modal_title_style()));
    }
    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(border_style()));
    f.render_widget(bar, chunks[0]);

    let tasks = app.visible_todo_tasks();
    let done_count = tasks.iter().filter(|t| t.is_done()).count();
    let title = format!(" Tasks  {}/{} done ", done_count, tasks.len());

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let checkbox = if task.is_done() { "[x]" } else { "[ ]" };
            let name_style = if task.is_done() { done_style() } else { default_style() };
            let due = match task.due_date {
                Some(d) if queries::is_today(d, app.today) => Span::styled(" today", today_style()),
                Some(d) if queries::is_overdue(d, app.today) && !task.is_done() => {
                    Span::styled(d.format(" %Y-%m-%d overdue").to_string(), overdue_style())
                }
                Some(d) => Span::styled(d.format(" %Y-%m-%d").to_string(), muted_style()),
                None => Span::raw(""),
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {} ", checkbox)),
                Span::styled(
                    format!("{} ", priority_marker(task.priority, app.config.use_emoji)),
                    priority_style(task.priority),
                ),
                Span::styled(task.title.as_str(), name_style),
                Span::styled(
                    format!("  {}", queries::project_label(&app.store, task.project_id)),
                    muted_style(),
                ),
                due,
            ]))
        })
        .collect();

    let empty = items.is_empty();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style())),
        )
        .highlight_style(selected_style());

    let mut state = ListState::default();
    if !empty {
        state.select(Some(app.todo_selected));
    }
    f.render_stateful_widget(list, chunks[1], &mut state);
}
