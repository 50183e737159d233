use crate::app::AppState;
use crate::pomodoro::{format_clock, Pomodoro, SessionKind};
use crate::ui::styles::{
    active_tab_style, border_style, gauge_style, muted_style, paused_style, running_style,
    title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

fn session_key(kind: SessionKind) -> char {
    match kind {
        SessionKind::Work => 'w',
        SessionKind::ShortBreak => 'b',
        SessionKind::LongBreak => 'l',
    }
}

/// Interval name plus the running session count
fn session_label(timer: &Pomodoro) -> String {
    format!("{}  ·  Session #{}", timer.kind().label(), timer.session_number())
}

/// Render the Pomodoro timer
pub fn render_pomodoro(f: &mut Frame, app: &AppState, area: Rect) {
    let timer = &app.pomodoro;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Pomodoro ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Session selector
            Constraint::Length(2), // Label
            Constraint::Length(3), // Clock
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Stats and settings
        ])
        .split(inner);

    // Session selector
    let mut tabs = Vec::new();
    for kind in SessionKind::all() {
        let label = format!(" [{}] {} ", session_key(*kind), kind.label());
        if *kind == timer.kind() {
            tabs.push(Span::styled(label, active_tab_style()));
        } else {
            tabs.push(Span::styled(label, muted_style()));
        }
        tabs.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Line::from(tabs)).alignment(Alignment::Center), chunks[0]);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(session_label(timer), title_style())))
            .alignment(Alignment::Center),
        chunks[1],
    );

    let (state, clock_style) = if timer.is_running() {
        ("running", running_style())
    } else {
        ("paused", paused_style())
    };
    let clock = vec![
        Line::from(Span::styled(format_clock(timer.remaining_secs()), clock_style)),
        Line::from(Span::styled(state, muted_style())),
    ];
    f.render_widget(Paragraph::new(clock).alignment(Alignment::Center), chunks[2]);

    // progress_ratio is the fraction left; the bar fills as time passes
    let ratio = (1.0 - timer.progress_ratio()).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).border_style(border_style()))
        .gauge_style(gauge_style())
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    f.render_widget(gauge, chunks[3]);

    let settings = timer.settings();
    let stats = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("Completed pomodoros  ", muted_style()),
            Span::styled(timer.completed_work_count().to_string(), title_style()),
        ]),
        Line::from(Span::styled(
            format!(
                "Work {}m · Short break {}m · Long break {}m every {} sessions",
                settings.work_minutes,
                settings.short_break_minutes,
                settings.long_break_minutes,
                settings.long_break_interval
            ),
            muted_style(),
        )),
    ];
    f.render_widget(Paragraph::new(stats).alignment(Alignment::Center), chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pomodoro::PomodoroSettings;

    #[test]
    fn test_session_keys_are_distinct() {
        let keys: Vec<char> = SessionKind::all().iter().map(|k| session_key(*k)).collect();
        assert_eq!(keys, vec!['w', 'b', 'l']);
    }

    #[test]
    fn test_session_number_shown_on_breaks() {
        let mut timer = Pomodoro::new(PomodoroSettings::default());
        assert_eq!(session_label(&timer), "Work Session  ·  Session #1");

        timer.skip();
        assert_eq!(timer.kind(), SessionKind::ShortBreak);
        assert!(session_label(&timer).ends_with("Session #2"));
    }
}
