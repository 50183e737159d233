use crate::domain::{UiMode, View};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Key hints for the current mode and view
pub fn hints(mode: UiMode, view: View) -> &'static [&'static str] {
    match mode {
        UiMode::Login => &["Tab switch field", "Enter log in", "Esc quit"],
        UiMode::AddingTask => &[
            "Tab/↑↓ field",
            "←/→/Space choose",
            "Enter save",
            "Esc cancel",
        ],
        UiMode::Searching => &["type to search", "Enter keep", "Esc clear"],
        UiMode::ConfirmDelete => &["y delete", "n cancel"],
        UiMode::EditingSettings => &["Tab field", "0-9 minutes", "Enter save", "Esc cancel"],
        UiMode::Normal => match view {
            View::Dashboard => &["↑/↓ select", "Enter open", "1-6 views", "L logout", "q quit"],
            View::ProjectDetail => &["+/- progress", "s status", "Esc back", "q quit"],
            View::Kanban => &[
                "↑/↓ select",
                "Tab/h/l column",
                "←/→ move card",
                "a add",
                "x delete",
                "q quit",
            ],
            View::Todo => &[
                "↑/↓ select",
                "Space done",
                "f filter",
                "/ search",
                "a add",
                "x delete",
                "q quit",
            ],
            View::Calendar => &["←/→ day", "↑/↓ week", "[/] month", "t today", "q quit"],
            View::Timeline => &["↑/↓ scroll", "r range", "p project", "q quit"],
            View::Pomodoro => &[
                "Enter start/pause",
                "r reset",
                "s skip",
                "w/b/l session",
                "o settings",
                "q quit",
            ],
        },
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, view: View, area: Rect) {
    let spans: Vec<Span> = hints(mode, view)
        .iter()
        .map(|hint| Span::raw(format!(" {}  ", hint)))
        .collect();

    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}
