use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use scribepad_core::validation::field;

use crate::app::{App, LoginFocus, RegisterFocus, SetPasswordFocus};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::{button_line, field_line, push_field_error};

/// Width of the text inside an input's brackets
const FIELD_WIDTH: usize = 28;

const FORM_WIDTH: u16 = 52;

pub fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.login;
    let error = form.error.as_ref();

    let mut lines = vec![Line::from("")];
    lines.push(field_line(
        "Email",
        &form.email,
        form.focus == LoginFocus::Email,
        false,
        FIELD_WIDTH,
    ));
    push_field_error(&mut lines, error, field::EMAIL);
    lines.push(field_line(
        "Password",
        &form.password,
        form.focus == LoginFocus::Password,
        true,
        FIELD_WIDTH,
    ));
    push_field_error(&mut lines, error, field::PASSWORD);
    lines.push(Line::from(""));
    lines.push(button_line("Login", form.focus == LoginFocus::Button, 18));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Tab", styles::help_key_style()),
        Span::styled(" next  ", styles::muted_style()),
        Span::styled("Enter", styles::help_key_style()),
        Span::styled(" on button submits  ", styles::muted_style()),
        Span::styled("Esc", styles::help_key_style()),
        Span::styled(" back", styles::muted_style()),
    ]));

    render_form(frame, area, " Login ", lines);
}

pub fn render_register(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.register;
    let error = form.error.as_ref();

    let mut lines = vec![Line::from("")];
    lines.push(field_line(
        "First Name",
        &form.first_name,
        form.focus == RegisterFocus::FirstName,
        false,
        FIELD_WIDTH,
    ));
    push_field_error(&mut lines, error, field::FIRST_NAME);
    lines.push(field_line(
        "Last Name",
        &form.last_name,
        form.focus == RegisterFocus::LastName,
        false,
        FIELD_WIDTH,
    ));
    push_field_error(&mut lines, error, field::LAST_NAME);
    lines.push(field_line(
        "Email",
        &form.email,
        form.focus == RegisterFocus::Email,
        false,
        FIELD_WIDTH,
    ));
    push_field_error(&mut lines, error, field::EMAIL);
    lines.push(Line::from(""));
    lines.push(button_line("Register", form.focus == RegisterFocus::Button, 16));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  A link to set your password will be emailed to you.",
        styles::muted_style(),
    )));

    render_form(frame, area, " Register ", lines);
}

pub fn render_set_password(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.set_password;

    let mut lines = vec![Line::from("")];
    lines.push(field_line(
        "Password",
        &form.password,
        form.focus == SetPasswordFocus::Password,
        true,
        FIELD_WIDTH,
    ));
    push_field_error(&mut lines, form.error.as_ref(), field::PASSWORD);
    lines.push(Line::from(""));
    lines.push(button_line(
        "Set Password",
        form.focus == SetPasswordFocus::Button,
        14,
    ));

    render_form(frame, area, " Set New Password ", lines);
}

fn render_form(frame: &mut Frame, area: Rect, title: &'static str, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16 + 3;
    let form_area = centered_rect_fixed(FORM_WIDTH, height, area);

    frame.render_widget(Clear, form_area);

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), form_area);
}
