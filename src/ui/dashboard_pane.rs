use crate::app::AppState;
use crate::queries::{self, DashboardStats};
use crate::ui::styles::{
    border_style, default_style, muted_style, overdue_style, selected_style, status_style,
    title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Text progress bar, e.g. `[######----] 60%`
pub fn progress_bar(progress: u8, width: usize) -> String {
    let filled = (usize::from(progress.min(100)) * width + 50) / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        progress
    )
}

fn stat_cards(stats: &DashboardStats) -> [(&'static str, String); 4] {
    [
        ("Total projects", stats.total_projects.to_string()),
        ("Completed", stats.completed_projects.to_string()),
        ("In progress", stats.in_progress_projects.to_string()),
        ("Average progress", format!("{}%", stats.average_progress)),
    ]
}

/// Render the dashboard: headline numbers and the project list
pub fn render_dashboard(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let stats = queries::dashboard_stats(&app.store);
    let card_areas = crate::ui::layout::columns(chunks[0], 4);
    for ((label, value), card_area) in stat_cards(&stats).into_iter().zip(card_areas) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(value, title_style())),
            Line::from(Span::styled(label, muted_style())),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style()));
        f.render_widget(card, card_area);
    }

    let items: Vec<ListItem> = app
        .store
        .projects()
        .iter()
        .map(|project| {
            let due_style = if queries::is_overdue(project.due_date, app.today) && !project.is_complete() {
                overdue_style()
            } else {
                muted_style()
            };
            let lead = project.lead().map_or("", |m| m.name.as_str());
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!(" {} ", project.name), default_style()),
                    Span::styled(format!("[{}]", project.status.label()), status_style(project.status)),
                ]),
                Line::from(vec![
                    Span::raw("   "),
                    Span::styled(progress_bar(project.progress, 20), status_style(project.status)),
                    Span::styled(format!("  due {}", project.due_date.format("%Y-%m-%d")), due_style),
                    Span::styled(
                        format!("  {} members  lead {}", project.members.len(), lead),
                        muted_style(),
                    ),
                ]),
            ])
        })
        .collect();

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(app.selected_project));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Projects ", title_style())),
        )
        .highlight_style(selected_style());
    f.render_stateful_widget(list, chunks[1], &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[----------]   0%");
        assert_eq!(progress_bar(75, 10), "[########--]  75%");
        assert_eq!(progress_bar(100, 10), "[##########] 100%");
    }
}
