//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes. While a text field has focus, every key goes
//! to the form; otherwise global shortcuts are checked first.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use scribepad_core::models::ArticleStatus;
use scribepad_core::Route;

use crate::app::{
    can_add_content_char, can_add_email_char, can_add_name_char, can_add_password_char,
    can_add_title_char, App, AppState, ArticleFocus, LoginFocus, RegisterFocus, SetPasswordFocus,
    PAGE_SCROLL_SIZE,
};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle delete confirmation
    if matches!(app.state, AppState::ConfirmingDelete) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.delete_article(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    if matches!(app.state, AppState::Quitting) {
        return Ok(true);
    }

    // Session not known yet: only quitting makes sense
    let Some(route) = app.visible_route().cloned() else {
        if key.code == KeyCode::Char('q') {
            app.state = AppState::ConfirmingQuit;
        }
        return Ok(false);
    };

    if !app.is_editing_text() && handle_global_key(app, key) {
        return Ok(false);
    }

    match route {
        Route::Home => handle_home_input(app, key),
        Route::Login => handle_login_input(app, key),
        Route::Register => handle_register_input(app, key),
        Route::SetPassword { .. } => handle_set_password_input(app, key),
        Route::Articles => handle_articles_input(app, key),
        Route::Article { .. } => handle_article_input(app, key),
        Route::AddArticle | Route::EditArticle { .. } => handle_article_form_input(app, key),
    }

    Ok(false)
}

/// Shortcuts available outside text fields. Returns true if the key was used.
fn handle_global_key(app: &mut App, key: KeyEvent) -> bool {
    let authenticated = app.is_authenticated();
    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Esc => app.go_back(),
        KeyCode::Char('h') => app.open(Route::Home),
        KeyCode::Char('a') => app.open(Route::Articles),
        KeyCode::Char('n') if authenticated => app.open(Route::AddArticle),
        KeyCode::Char('L') if authenticated => app.logout(),
        KeyCode::Char('l') if !authenticated => app.open(Route::Login),
        KeyCode::Char('g') if !authenticated => app.open(Route::Register),
        _ => return false,
    }
    true
}

fn handle_home_input(app: &mut App, key: KeyEvent) {
    let count = app.home_actions().len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.home_selection = app.home_selection.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.home_selection + 1 < count {
                app.home_selection += 1;
            }
        }
        KeyCode::Enter => app.activate_home_action(),
        _ => {}
    }
}

fn handle_login_input(app: &mut App, key: KeyEvent) {
    let form = &mut app.login;
    match key.code {
        KeyCode::Esc => {
            app.go_back();
        }
        KeyCode::Down | KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::Up | KeyCode::BackTab => form.focus = form.focus.prev(),
        KeyCode::Enter => match form.focus {
            LoginFocus::Email | LoginFocus::Password => form.focus = form.focus.next(),
            LoginFocus::Button => app.submit_login(),
        },
        KeyCode::Backspace => match form.focus {
            LoginFocus::Email => {
                form.email.pop();
            }
            LoginFocus::Password => {
                form.password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match form.focus {
            LoginFocus::Email => {
                if can_add_email_char(form.email.chars().count(), c) {
                    form.email.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(form.password.chars().count(), c) {
                    form.password.push(c);
                }
            }
            LoginFocus::Button => {
                // Ignore character input on button
            }
        },
        _ => {}
    }
}

fn handle_register_input(app: &mut App, key: KeyEvent) {
    let form = &mut app.register;
    match key.code {
        KeyCode::Esc => {
            app.go_back();
        }
        KeyCode::Down | KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::Up | KeyCode::BackTab => form.focus = form.focus.prev(),
        KeyCode::Enter => match form.focus {
            RegisterFocus::Button => app.submit_register(),
            _ => form.focus = form.focus.next(),
        },
        KeyCode::Backspace => {
            let target = match form.focus {
                RegisterFocus::FirstName => &mut form.first_name,
                RegisterFocus::LastName => &mut form.last_name,
                RegisterFocus::Email => &mut form.email,
                RegisterFocus::Button => return,
            };
            target.pop();
        }
        KeyCode::Char(c) => match form.focus {
            RegisterFocus::FirstName => {
                if can_add_name_char(form.first_name.chars().count(), c) {
                    form.first_name.push(c);
                }
            }
            RegisterFocus::LastName => {
                if can_add_name_char(form.last_name.chars().count(), c) {
                    form.last_name.push(c);
                }
            }
            RegisterFocus::Email => {
                if can_add_email_char(form.email.chars().count(), c) {
                    form.email.push(c);
                }
            }
            RegisterFocus::Button => {}
        },
        _ => {}
    }
}

fn handle_set_password_input(app: &mut App, key: KeyEvent) {
    let form = &mut app.set_password;
    match key.code {
        KeyCode::Esc => {
            app.go_back();
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            form.focus = form.focus.toggle();
        }
        KeyCode::Enter => match form.focus {
            SetPasswordFocus::Password => form.focus = SetPasswordFocus::Button,
            SetPasswordFocus::Button => app.submit_set_password(),
        },
        KeyCode::Backspace => {
            if form.focus == SetPasswordFocus::Password {
                form.password.pop();
            }
        }
        KeyCode::Char(c) => {
            if form.focus == SetPasswordFocus::Password
                && can_add_password_char(form.password.chars().count(), c)
            {
                form.password.push(c);
            }
        }
        _ => {}
    }
}

fn handle_articles_input(app: &mut App, key: KeyEvent) {
    let count = app.articles.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.article_selection = app.article_selection.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.article_selection + 1 < count {
                app.article_selection += 1;
            }
        }
        KeyCode::PageUp => {
            app.article_selection = app.article_selection.saturating_sub(PAGE_SCROLL_SIZE);
        }
        KeyCode::PageDown => {
            app.article_selection =
                (app.article_selection + PAGE_SCROLL_SIZE).min(count.saturating_sub(1));
        }
        KeyCode::Home => app.article_selection = 0,
        KeyCode::End => app.article_selection = count.saturating_sub(1),
        KeyCode::Enter => app.open_selected_article(),
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}

fn handle_article_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::PageUp => {
            app.detail_scroll = app.detail_scroll.saturating_sub(PAGE_SCROLL_SIZE as u16);
        }
        KeyCode::PageDown => {
            app.detail_scroll = app.detail_scroll.saturating_add(PAGE_SCROLL_SIZE as u16);
        }
        KeyCode::Char('e') => app.edit_current_article(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}

fn handle_article_form_input(app: &mut App, key: KeyEvent) {
    let form = &mut app.article_form;
    match key.code {
        KeyCode::Esc => {
            app.go_back();
        }
        KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::BackTab => form.focus = form.focus.prev(),
        // Up/Down move between lines inside the body, so they only change
        // focus outside it
        KeyCode::Down if form.focus != ArticleFocus::Content => form.focus = form.focus.next(),
        KeyCode::Up if form.focus != ArticleFocus::Content => form.focus = form.focus.prev(),
        KeyCode::Left | KeyCode::Right if !form.focus.is_text() => {
            form.focus = match form.focus {
                ArticleFocus::SaveDraft => ArticleFocus::Publish,
                _ => ArticleFocus::SaveDraft,
            };
        }
        KeyCode::Enter => match form.focus {
            ArticleFocus::Title => form.focus = ArticleFocus::Content,
            ArticleFocus::Content => {
                if form.loaded && can_add_content_char(form.content.chars().count(), '\n') {
                    form.content.push('\n');
                }
            }
            ArticleFocus::SaveDraft => app.submit_article(ArticleStatus::Draft),
            ArticleFocus::Publish => app.submit_article(ArticleStatus::Published),
        },
        KeyCode::Backspace => match form.focus {
            ArticleFocus::Title => {
                form.title.pop();
            }
            ArticleFocus::Content => {
                form.content.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) if form.loaded => match form.focus {
            ArticleFocus::Title => {
                if can_add_title_char(form.title.chars().count(), c) {
                    form.title.push(c);
                }
            }
            ArticleFocus::Content => {
                if can_add_content_char(form.content.chars().count(), c) {
                    form.content.push(c);
                }
            }
            _ => {}
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use scribepad_core::session::TOKEN_KEY;
    use scribepad_core::{Config, MemoryStorage};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_input(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    fn anonymous_app() -> App {
        let mut app = App::new(Config::default(), Box::new(MemoryStorage::new())).unwrap();
        app.initialize_session();
        app
    }

    #[tokio::test]
    async fn test_letters_go_to_focused_field_not_shortcuts() {
        let mut app = anonymous_app();
        app.open(Route::Login);
        assert_eq!(app.login.focus, LoginFocus::Email);

        // 'q', 'h' and 'g' would be shortcuts outside a text field
        type_text(&mut app, "qhg@ex.io");
        assert_eq!(app.login.email, "qhg@ex.io");
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.visible_route(), Some(&Route::Login));
    }

    #[tokio::test]
    async fn test_login_focus_and_inline_error() {
        let mut app = anonymous_app();
        app.open(Route::Login);

        handle_input(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.login.focus, LoginFocus::Password);
        type_text(&mut app, "abc");
        assert_eq!(app.login.password, "abc");

        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.login.focus, LoginFocus::Button);
        handle_input(&mut app, key(KeyCode::Enter)).unwrap();

        let error = app.login.error.as_ref().unwrap();
        assert_eq!(error.message, "Email is required");
    }

    #[tokio::test]
    async fn test_shortcuts_outside_text_fields() {
        let mut app = anonymous_app();
        assert_eq!(app.visible_route(), Some(&Route::Home));

        handle_input(&mut app, key(KeyCode::Char('g'))).unwrap();
        assert_eq!(app.visible_route(), Some(&Route::Register));

        handle_input(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.visible_route(), Some(&Route::Home));

        handle_input(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))).unwrap());
    }

    #[tokio::test]
    async fn test_esc_on_home_without_history_stays_home() {
        let mut app = anonymous_app();
        handle_input(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.visible_route(), Some(&Route::Home));
        assert_eq!(app.toasts.len(), 0);
    }

    #[tokio::test]
    async fn test_protected_shortcut_redirects_anonymous_user() {
        let mut app = anonymous_app();
        handle_input(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.visible_route(), Some(&Route::Login));
    }

    #[tokio::test]
    async fn test_article_form_enter_adds_newline_in_content() {
        let storage = MemoryStorage::new().with_entry(TOKEN_KEY, "t");
        let mut app = App::new(Config::default(), Box::new(storage)).unwrap();
        app.initialize_session();
        app.open(Route::AddArticle);

        type_text(&mut app, "Hi");
        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.article_form.focus, ArticleFocus::Content);
        type_text(&mut app, "one");
        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        type_text(&mut app, "two");
        assert_eq!(app.article_form.title, "Hi");
        assert_eq!(app.article_form.content, "one\ntwo");

        handle_input(&mut app, key(KeyCode::Tab)).unwrap();
        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        let error = app.article_form.error.as_ref().unwrap();
        assert_eq!(error.message, "Title must be at least 3 characters");
    }
}
