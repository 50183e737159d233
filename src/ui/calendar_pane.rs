use crate::app::AppState;
use crate::queries::{self, EventKind};
use crate::ui::styles::{
    border_style, default_style, muted_style, selected_style, title_style, today_style,
};
use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const UPCOMING_LIMIT: usize = 5;
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn pane(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()))
}

/// Month grid rows, one `Line` per week. Days with deadlines get a `*`.
fn month_lines(app: &AppState) -> Vec<Line<'static>> {
    let selected = app.calendar_date;
    let (year, month) = (selected.year(), selected.month());

    let mut lines = vec![
        Line::from(
            WEEKDAYS
                .iter()
                .map(|d| Span::styled(format!(" {:<4}", d), muted_style()))
                .collect::<Vec<_>>(),
        ),
        Line::raw(""),
    ];

    let cells = queries::month_grid(year, month);
    for week in cells.chunks(7) {
        let spans: Vec<Span> = week
            .iter()
            .map(|cell| match cell.and_then(|day| NaiveDate::from_ymd_opt(year, month, day)) {
                None => Span::raw("     "),
                Some(date) => {
                    let marker = if queries::events_on(&app.store, date).is_empty() {
                        " "
                    } else {
                        "*"
                    };
                    let text = format!(" {:>2}{} ", date.day(), marker);
                    let style = if date == selected {
                        selected_style()
                    } else if queries::is_today(date, app.today) {
                        today_style()
                    } else {
                        default_style()
                    };
                    Span::styled(text, style)
                }
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::raw(""));
    }
    lines
}

fn event_line(kind: EventKind, title: &str, date: Option<NaiveDate>) -> Line<'static> {
    let tag = match kind {
        EventKind::Project => Span::styled("project ", today_style()),
        EventKind::Task => Span::styled("task    ", muted_style()),
    };
    let mut spans = vec![Span::raw(" "), tag, Span::styled(title.to_string(), default_style())];
    if let Some(date) = date {
        spans.push(Span::styled(date.format("  %d %b").to_string(), muted_style()));
    }
    Line::from(spans)
}

/// Render the month calendar, the selected day's events and upcoming deadlines
pub fn render_calendar(f: &mut Frame, app: &AppState, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(0)])
        .split(area);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(cols[1]);

    let month_title = format!(" {} ", app.calendar_date.format("%B %Y"));
    f.render_widget(Paragraph::new(month_lines(app)).block(pane(month_title)), cols[0]);

    // Selected day
    let events = queries::events_on(&app.store, app.calendar_date);
    let day_lines: Vec<Line> = if events.is_empty() {
        vec![Line::from(Span::styled(" Nothing due", muted_style()))]
    } else {
        events
            .iter()
            .map(|e| event_line(e.kind, &e.title, None))
            .collect()
    };
    let day_title = format!(" {} ", app.calendar_date.format("%A %d %B"));
    f.render_widget(Paragraph::new(day_lines).block(pane(day_title)), side[0]);

    // Upcoming deadlines
    let projects: Vec<Line> = queries::upcoming_projects(&app.store, app.today, UPCOMING_LIMIT)
        .into_iter()
        .map(|p| event_line(EventKind::Project, &p.name, Some(p.due_date)))
        .collect();
    f.render_widget(
        Paragraph::new(projects).block(pane(" Upcoming projects ".to_string())),
        side[1],
    );

    let tasks: Vec<Line> = queries::upcoming_tasks(&app.store, app.today, UPCOMING_LIMIT)
        .into_iter()
        .map(|t| {
            let mut line = event_line(EventKind::Task, &t.title, t.due_date);
            if t.is_done() {
                line.spans.iter_mut().for_each(|s| s.style = s.style.add_modifier(Modifier::CROSSED_OUT));
            }
            line
        })
        .collect();
    f.render_widget(
        Paragraph::new(tasks).block(pane(" Upcoming tasks ".to_string())),
        side[2],
    );
}
