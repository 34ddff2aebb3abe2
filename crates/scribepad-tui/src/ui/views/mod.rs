//! Per-route content renderers.

pub mod article;
pub mod article_form;
pub mod articles;
pub mod auth;
pub mod home;

use ratatui::text::{Line, Span};

use scribepad_core::FieldError;

use crate::ui::styles;

/// Labelled single-line input: `Label: [value▌]`.
/// Long values scroll so the end (where typing happens) stays visible.
pub(crate) fn field_line(
    label: &str,
    value: &str,
    focused: bool,
    masked: bool,
    width: usize,
) -> Line<'static> {
    let shown: String = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let len = shown.chars().count();
    let visible: String = if len > width {
        shown.chars().skip(len - width).collect()
    } else {
        shown
    };

    let style = if focused {
        styles::selected_style()
    } else {
        styles::text_style()
    };
    let cursor = if focused { "▌" } else { " " };

    Line::from(vec![
        Span::styled(format!("  {:>11}: [", label), styles::muted_style()),
        Span::styled(format!("{:<width$}{}", visible, cursor, width = width), style),
        Span::styled("]", styles::muted_style()),
    ])
}

pub(crate) fn button_line(label: &str, focused: bool, indent: usize) -> Line<'static> {
    let pad = " ".repeat(indent);
    if focused {
        Line::from(vec![
            Span::raw(format!("{}[", pad)),
            Span::styled(format!(" ▶ {} ◀ ", label), styles::selected_style()),
            Span::raw("]"),
        ])
    } else {
        Line::from(vec![
            Span::raw(format!("{}[", pad)),
            Span::styled(format!("   {}   ", label), styles::text_style()),
            Span::raw("]"),
        ])
    }
}

/// Inline message under a field, if the form's error belongs to it
pub(crate) fn push_field_error(lines: &mut Vec<Line<'static>>, error: Option<&FieldError>, field: &str) {
    if let Some(error) = error.filter(|e| e.field == field) {
        lines.push(Line::from(Span::styled(
            format!("               {}", error.message),
            styles::error_style(),
        )));
    }
}
