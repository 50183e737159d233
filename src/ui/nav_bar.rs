use crate::app::AppState;
use crate::domain::View;
use crate::pomodoro::format_clock;
use crate::ui::styles::{active_tab_style, hint_style, muted_style, paused_style, running_style};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Tabs on the left; user, Pomodoro clock and logout hint on the right
pub fn render_nav_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(44)])
        .split(area);

    // Project detail is reached from the dashboard, so keep that tab lit
    let active = match app.view {
        View::ProjectDetail => View::Dashboard,
        other => other,
    };

    let mut tabs = vec![Span::styled(" ProjectPro ", running_style())];
    for (idx, view) in View::tabs().iter().enumerate() {
        let label = format!(" {} {} ", idx + 1, view.name());
        if *view == active {
            tabs.push(Span::styled(label, active_tab_style()));
        } else {
            tabs.push(Span::styled(label, muted_style()));
        }
    }
    f.render_widget(Paragraph::new(Line::from(tabs)), chunks[0]);

    let user = app
        .session
        .current_user()
        .map_or_else(String::new, |u| format!("{} ({}) ", u.name, u.initials()));

    let clock_style = if app.pomodoro.is_running() {
        running_style()
    } else {
        paused_style()
    };
    let right = Line::from(vec![
        Span::styled(
            format!("{} {} ", app.pomodoro.kind().short_name(), format_clock(app.pomodoro.remaining_secs())),
            clock_style,
        ),
        Span::raw(user),
        Span::styled("L logout ", hint_style()),
    ]);
    f.render_widget(Paragraph::new(right).alignment(Alignment::Right), chunks[1]);
}
