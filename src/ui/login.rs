use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{border_style, hint_style, modal_title_style, muted_style, title_style},
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the login screen. Any username and password are accepted.
pub fn render_login(f: &mut Frame, app: &AppState, area: Rect) {
    let form_area = create_modal_area(area, 13);
    let form = &app.login_form;

    let field = |label: &'static str, value: String, editing: bool| {
        let label = Span::styled(
            format!("  {:<10}", label),
            if editing { modal_title_style() } else { muted_style() },
        );
        let cursor = if editing { "█" } else { "" };
        Line::from(vec![label, Span::raw(value), Span::styled(cursor, modal_title_style())])
    };

    let masked = "•".repeat(form.password.chars().count());
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled("Welcome back", title_style())).alignment(Alignment::Center),
        Line::from(Span::styled("Sign in to manage your projects", muted_style()))
            .alignment(Alignment::Center),
        Line::raw(""),
        field("Username", form.username.clone(), form.editing_field == 0),
        Line::raw(""),
        field("Password", masked, form.editing_field == 1),
        Line::raw(""),
        Line::from(Span::styled(
            "Tab switch field  ·  Enter sign in  ·  Esc quit",
            hint_style(),
        ))
        .alignment(Alignment::Center),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" ProjectPro ", title_style())),
    );
    f.render_widget(paragraph, form_area);
}
