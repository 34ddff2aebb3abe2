use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use scribepad_core::models::ArticleStatus;
use scribepad_core::utils::{preview_line, truncate_string};

use crate::app::App;
use crate::ui::styles;

/// Characters of article body shown in the preview pane
const PREVIEW_LENGTH: usize = 600;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_article_table(frame, app, chunks[0]);
    render_preview(frame, app, chunks[1]);
}

fn render_article_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new([Cell::from("Title"), Cell::from("Status"), Cell::from("Date")])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = app
        .articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let style = if i == app.article_selection {
                styles::selected_style()
            } else {
                styles::text_style()
            };
            let published = article.article_status == ArticleStatus::Published;
            Row::new(vec![
                Cell::from(truncate_string(&article.title, 48)),
                Cell::from(Span::styled(
                    article.article_status.to_string(),
                    styles::status_style(published),
                )),
                Cell::from(article.formatted_date()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(13),
    ];

    let title = if app.is_loading() && app.articles.is_empty() {
        " Articles (loading...) ".to_string()
    } else {
        format!(" Articles ({}) - [n]ew [r]eload ", app.articles.len())
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::title_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !app.articles.is_empty() {
        state.select(Some(app.article_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let (title, content) = match app.selected_article() {
        Some(article) => {
            let lines = vec![
                Line::from(vec![
                    Span::styled("Author: ", styles::highlight_style()),
                    Span::raw(article.author_name()),
                ]),
                Line::from(vec![
                    Span::styled("Posted: ", styles::highlight_style()),
                    Span::raw(article.formatted_date()),
                ]),
                Line::from(""),
                Line::from(preview_line(&article.content, PREVIEW_LENGTH)),
                Line::from(""),
                Line::from(Span::styled("Enter to read", styles::muted_style())),
            ];
            (format!(" {} ", truncate_string(&article.title, 40)), lines)
        }
        None => (
            " No Article Selected ".to_string(),
            vec![Line::from(Span::styled(
                "No articles yet. Press n to write the first one.",
                styles::muted_style(),
            ))],
        ),
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
