use crate::domain::{Priority, Status};
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Border of the focused column/pane
pub fn focused_border_style() -> Style {
    Style::default().fg(Color::LightCyan)
}

/// Active navigation tab
pub fn active_tab_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Secondary text (dates, labels)
pub fn muted_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Running timer style
pub fn running_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Paused timer style
pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Progress gauge style
pub fn gauge_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Overdue date style
pub fn overdue_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Due-today date style
pub fn today_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn status_style(status: Status) -> Style {
    let color = match status {
        Status::Todo => Color::Gray,
        Status::InProgress => Color::Blue,
        Status::Review => Color::Yellow,
        Status::Done => Color::Green,
    };
    Style::default().fg(color)
}

pub fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Green),
    }
}

/// Short marker for a priority; plain text when emoji are disabled
pub fn priority_marker(priority: Priority, use_emoji: bool) -> &'static str {
    match (priority, use_emoji) {
        (Priority::High, true) => "🔴",
        (Priority::Medium, true) => "🟡",
        (Priority::Low, true) => "🟢",
        (Priority::High, false) => "!!!",
        (Priority::Medium, false) => "!! ",
        (Priority::Low, false) => "!  ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_marker_without_emoji_is_ascii() {
        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            assert!(priority_marker(priority, false).is_ascii());
            assert!(!priority_marker(priority, true).is_ascii());
        }
    }
}
