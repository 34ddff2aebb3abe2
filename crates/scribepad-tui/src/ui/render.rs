use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use scribepad_core::{Route, ToastKind};

use crate::app::{App, AppState};

use super::styles;
use super::views::{article, article_form, articles, auth, home};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(2), // Navbar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_navbar(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::ConfirmingDelete => render_delete_overlay(frame, app),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.visible_route() {
        Some(route) => format!("  Scribepad - {}", route.title()),
        None => "  Scribepad".to_string(),
    };
    let account = match app.store.user() {
        Some(user) if app.is_authenticated() => format!("{}  [?] Help", user.display_name()),
        _ => "[?] Help".to_string(),
    };
    let padding = (area.width as usize)
        .saturating_sub(title.chars().count() + account.chars().count() + 2);

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(account, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

/// Navbar links, with the key that follows each one
fn render_navbar(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.visible_route();
    let links: Vec<(&str, bool)> = if app.is_authenticated() {
        vec![
            ("[h]ome", matches!(current, Some(Route::Home))),
            (
                "[a]rticles",
                matches!(current, Some(Route::Articles | Route::Article { .. })),
            ),
            (
                "[n]ew article",
                matches!(current, Some(Route::AddArticle | Route::EditArticle { .. })),
            ),
            ("[L]ogout", false),
        ]
    } else {
        vec![
            ("[h]ome", matches!(current, Some(Route::Home))),
            ("[l]ogin", matches!(current, Some(Route::Login))),
            ("re[g]ister", matches!(current, Some(Route::Register))),
        ]
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, selected)) in links.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(*label, styles::nav_style(*selected)));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    // Nothing is drawn until the session is known
    let Some(route) = app.visible_route() else {
        return;
    };

    match route {
        Route::Home => home::render(frame, app, area),
        Route::Login => auth::render_login(frame, app, area),
        Route::Register => auth::render_register(frame, app, area),
        Route::SetPassword { .. } => auth::render_set_password(frame, app, area),
        Route::Articles => articles::render(frame, app, area),
        Route::Article { .. } => article::render(frame, app, area),
        Route::AddArticle | Route::EditArticle { .. } => article_form::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = " [?] help | [q]uit ";

    let (left_text, left_style) = match app.toasts.latest() {
        Some(toast) => {
            let style = match toast.kind {
                ToastKind::Success => styles::success_style(),
                ToastKind::Error => styles::error_style(),
            };
            (format!(" {} ", toast.message), style)
        }
        None if app.is_loading() => (" Loading... ".to_string(), styles::muted_style()),
        None => match app.visible_route() {
            Some(route) => (format!(" {} ", route.title()), styles::muted_style()),
            None => (" Starting... ".to_string(), styles::muted_style()),
        },
    };

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(shortcuts.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(shortcuts, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_row(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 25, frame.area());

    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  S C R I B E P A D", styles::title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_row("h", "Home"),
        help_row("l / g", "Login / register"),
        help_row("a / n", "Articles / new article"),
        help_row("Esc", "Go back"),
        help_row("L", "Logout"),
        Line::from(""),
        Line::from(Span::styled(" Forms", styles::highlight_style())),
        help_row("Tab / ↑↓", "Next / previous field"),
        help_row("Enter", "Next field, or press the button"),
        Line::from(""),
        Line::from(Span::styled(" Articles", styles::highlight_style())),
        help_row("↑/↓ Enter", "Select and read"),
        help_row("e / d", "Edit / delete your own article"),
        help_row("r", "Reload"),
        help_row("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
pub(crate) fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_confirm_overlay(frame: &mut Frame, question: String, action: &'static str) {
    let area = centered_rect_fixed(46, 7, frame.area());

    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(question, styles::highlight_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(format!(" to {}, ", action), styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    render_confirm_overlay(frame, "   Are you sure you want to quit?".to_string(), "quit");
}

fn render_delete_overlay(frame: &mut Frame, app: &App) {
    let title = app
        .article
        .as_ref()
        .map(|a| scribepad_core::utils::truncate_string(&a.title, 24))
        .unwrap_or_default();
    render_confirm_overlay(frame, format!("   Delete \"{}\"?", title), "delete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed_centers() {
        let outer = Rect::new(0, 0, 100, 40);
        let rect = centered_rect_fixed(40, 10, outer);
        assert_eq!(rect, Rect::new(30, 15, 40, 10));
    }

    #[test]
    fn test_centered_rect_fixed_clamps_to_area() {
        let outer = Rect::new(5, 5, 20, 8);
        let rect = centered_rect_fixed(40, 10, outer);
        assert_eq!(rect, Rect::new(5, 5, 20, 8));
    }
}
