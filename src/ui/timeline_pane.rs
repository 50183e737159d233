use crate::app::AppState;
use crate::queries::{self, EventKind, ProjectFilter, TimelineEvent};
use crate::ui::styles::{
    active_tab_style, border_style, default_style, muted_style, overdue_style, priority_style,
    selected_style, status_style, title_style, today_style,
};
use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

fn date_span(event: &TimelineEvent, today: NaiveDate) -> Span<'static> {
    match event.date {
        None => Span::styled(" no date    ", muted_style()),
        Some(d) if queries::is_today(d, today) => Span::styled(" today      ", today_style()),
        Some(d) if queries::is_overdue(d, today) && event.progress < 100 => {
            Span::styled(d.format(" %Y-%m-%d !").to_string(), overdue_style())
        }
        Some(d) => Span::styled(d.format(" %Y-%m-%d  ").to_string(), muted_style()),
    }
}

fn event_item(event: &TimelineEvent, today: NaiveDate) -> ListItem<'static> {
    let kind = match event.kind {
        EventKind::Project => Span::styled(" ◆ ", today_style()),
        EventKind::Task => Span::styled(" ● ", status_style(event.status)),
    };
    let mut header = vec![
        date_span(event, today),
        kind,
        Span::styled(event.title.clone(), default_style()),
        Span::styled(format!("  [{}]", event.status.label()), status_style(event.status)),
    ];
    if let Some(priority) = event.priority {
        header.push(Span::styled(format!("  {}", priority.label()), priority_style(priority)));
    }
    ListItem::new(vec![
        Line::from(header),
        Line::from(Span::styled(
            format!(
                "               {}  ·  {}  ·  {}%",
                event.description, event.assignee, event.progress
            ),
            muted_style(),
        )),
    ])
}

/// Render the chronological project/task timeline
pub fn render_timeline(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let project_label = match app.project_filter {
        ProjectFilter::All => "All projects".to_string(),
        ProjectFilter::Only(id) => queries::project_label(&app.store, Some(id)),
    };
    let filters = Line::from(vec![
        Span::styled(" Range ", muted_style()),
        Span::styled(format!(" {} ", app.time_range.label()), active_tab_style()),
        Span::styled("   Project ", muted_style()),
        Span::styled(format!(" {} ", project_label), active_tab_style()),
    ]);
    f.render_widget(
        Paragraph::new(filters)
            .block(Block::default().borders(Borders::ALL).border_style(border_style())),
        chunks[0],
    );

    let events = app.visible_timeline_events();
    let title = format!(" Timeline  {} events ", events.len());
    let items: Vec<ListItem> = events.iter().map(|e| event_item(e, app.today)).collect();

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(app.timeline_scroll));
    }
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style())),
        )
        .highlight_style(selected_style());
    f.render_stateful_widget(list, chunks[1], &mut state);
}
