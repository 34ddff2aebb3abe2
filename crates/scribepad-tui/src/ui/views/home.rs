use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let actions = app.home_actions();
    let height = actions.len() as u16 + 10;
    let box_area = centered_rect_fixed(48, height, area);

    let greeting = match app.store.user() {
        Some(user) if app.is_authenticated() => format!("  Welcome back, {}", user.display_name()),
        _ if app.is_authenticated() => "  Welcome back".to_string(),
        _ => "  Read and write articles from your terminal".to_string(),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  S C R I B E P A D", styles::title_style())),
        Line::from(""),
        Line::from(Span::styled(greeting, styles::muted_style())),
        Line::from(""),
    ];

    for (i, action) in actions.iter().enumerate() {
        let selected = i == app.home_selection;
        let marker = if selected { "▶" } else { " " };
        let style = if selected {
            styles::selected_style()
        } else {
            styles::text_style()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("   {} ", marker), styles::highlight_style()),
            Span::styled(format!("{:<24}", action.label()), style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   ↑/↓", styles::help_key_style()),
        Span::styled(" choose  ", styles::muted_style()),
        Span::styled("Enter", styles::help_key_style()),
        Span::styled(" open", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), box_area);
}
