use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use scribepad_core::models::{image_url, ArticleStatus};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(article) = app.article.as_ref() else {
        let block = Block::default()
            .title(" Article ")
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true));
        let message = if app.is_loading() {
            "Loading article..."
        } else {
            "Article not available. Press r to retry."
        };
        let paragraph =
            Paragraph::new(Line::from(Span::styled(message, styles::muted_style()))).block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let published = article.article_status == ArticleStatus::Published;
    let mut lines = vec![
        Line::from(Span::styled(article.title.clone(), styles::title_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Status: ", styles::highlight_style()),
            Span::styled(article.article_status.to_string(), styles::status_style(published)),
        ]),
        Line::from(vec![
            Span::styled("Author: ", styles::highlight_style()),
            Span::raw(article.author_name()),
        ]),
        Line::from(vec![
            Span::styled("Posted: ", styles::highlight_style()),
            Span::raw(article.formatted_date()),
        ]),
    ];

    if let Some(image) = article.article_image.as_deref().filter(|i| !i.is_empty()) {
        lines.push(Line::from(vec![
            Span::styled("Image:  ", styles::highlight_style()),
            Span::styled(
                image_url(app.config.image_base_url.as_deref(), image),
                styles::muted_style(),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.extend(article.content.lines().map(|l| Line::from(l.to_string())));

    let actions = if app.can_modify_article() {
        " [e]dit [d]elete [r]eload [Esc] back "
    } else {
        " [r]eload [Esc] back "
    };

    let block = Block::default()
        .title(" Article ")
        .title_style(styles::title_style())
        .title_bottom(Line::from(Span::styled(actions, styles::muted_style())))
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(paragraph, area);
}
