use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the delete confirmation modal
pub fn render_confirm_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(confirm) = &app.confirm {
        let modal_area = create_modal_area(area, 8);

        // Clear the area behind the modal
        f.render_widget(Clear, modal_area);

        let lines = vec![
            Line::raw(""),
            Line::raw(format!("  Delete \"{}\"?", confirm.title)),
            Line::raw("  This cannot be undone."),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  [y]", modal_title_style()),
                Span::raw(" Delete  "),
                Span::styled("[n]", modal_title_style()),
                Span::raw(" Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Delete Task ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
