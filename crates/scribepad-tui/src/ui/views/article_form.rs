use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use scribepad_core::models::ArticleStatus;
use scribepad_core::validation::{field, MAX_TITLE_LENGTH};

use crate::app::{App, ArticleFocus};
use crate::ui::styles;

use super::{button_line, field_line, push_field_error};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.article_form;
    let heading = if form.editing.is_some() {
        " Update Article "
    } else {
        " Add New Article "
    };

    let outer = Block::default()
        .title(heading)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if !form.loaded {
        let loading = Paragraph::new(Line::from(Span::styled(
            "  Loading article...",
            styles::muted_style(),
        )));
        frame.render_widget(loading, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + error
            Constraint::Min(5),    // Content
            Constraint::Length(4), // Buttons + error
        ])
        .split(inner);

    render_title_field(frame, app, chunks[0]);
    render_content_field(frame, app, chunks[1]);
    render_buttons(frame, app, chunks[2]);
}

fn render_title_field(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.article_form;
    let width = (area.width as usize).saturating_sub(20).max(10);

    let mut lines = vec![field_line(
        "Title",
        &form.title,
        form.focus == ArticleFocus::Title,
        false,
        width,
    )];
    lines.push(Line::from(Span::styled(
        format!(
            "               {}/{} characters",
            form.title.trim().chars().count(),
            MAX_TITLE_LENGTH
        ),
        styles::muted_style(),
    )));
    push_field_error(&mut lines, form.error.as_ref(), field::TITLE);

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_content_field(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.article_form;
    let focused = form.focus == ArticleFocus::Content;

    let mut text = form.content.clone();
    if focused {
        text.push('▌');
    }
    let lines: Vec<Line> = text.split('\n').map(|l| Line::from(l.to_string())).collect();

    // Keep the cursor line in view
    let visible_rows = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible_rows) as u16;

    let block = Block::default()
        .title(" Content ")
        .title_style(if focused {
            styles::title_style()
        } else {
            styles::muted_style()
        })
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(styles::text_style())
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_buttons(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.article_form;

    let mut lines = Vec::new();
    push_field_error(&mut lines, form.error.as_ref(), field::CONTENT);
    if lines.is_empty() {
        lines.push(Line::from(""));
    }

    let mut buttons = button_line("Save as draft", form.focus == ArticleFocus::SaveDraft, 2);
    buttons
        .spans
        .extend(button_line("Publish", form.focus == ArticleFocus::Publish, 4).spans);
    lines.push(buttons);

    if form.editing.is_some() {
        let published = form.status == ArticleStatus::Published;
        lines.push(Line::from(vec![
            Span::styled("  Currently: ", styles::muted_style()),
            Span::styled(form.status.to_string(), styles::status_style(published)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
