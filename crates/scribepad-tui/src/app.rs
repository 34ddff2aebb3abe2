//! Application state management for Scribepad.
//!
//! This module contains the core `App` struct that owns the session store, the
//! navigator, the API client and all form/view state. Requests run on spawned
//! tasks and report back through an MPSC channel that the UI loop drains
//! between frames; only the UI task ever touches the session.

use std::future::Future;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use scribepad_core::models::{
    Article, ArticleDraft, ArticleStatus, LoginResponse, MessageResponse, RegisterRequest,
    SetPasswordResponse, User,
};
use scribepad_core::validation::{self, FieldError};
use scribepad_core::{
    resolve_failure, ActionError, ApiClient, ApiError, Config, FileStorage, KeyringStorage,
    MemoryStorage, Navigator, Resolution, Route, RouteGuard, SessionStorage, SessionStore,
    StorageBackend, Toasts,
};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 16;

/// Maximum length for email input (RFC 5321 path limit).
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for first/last name input.
const MAX_NAME_LENGTH: usize = 50;

/// Title input stops a little past the validation limit so the
/// "less than 100 characters" message can still be reached.
const MAX_TITLE_INPUT_LENGTH: usize = validation::MAX_TITLE_LENGTH + 20;

/// Maximum length for article body input.
const MAX_CONTENT_LENGTH: usize = 20_000;

/// Number of rows to move on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingDelete,
    ConfirmingQuit,
    Quitting,
}

/// Entries of the home screen menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    Login,
    Register,
    Articles,
    NewArticle,
    Logout,
}

impl HomeAction {
    pub fn label(&self) -> &'static str {
        match self {
            HomeAction::Login => "Login",
            HomeAction::Register => "Register",
            HomeAction::Articles => "Browse articles",
            HomeAction::NewArticle => "Write an article",
            HomeAction::Logout => "Logout",
        }
    }
}

/// Login form focus state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginFocus {
    #[default]
    Email,
    Password,
    Button,
}

impl LoginFocus {
    pub fn next(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::Button,
            LoginFocus::Button => LoginFocus::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Button,
            LoginFocus::Password => LoginFocus::Email,
            LoginFocus::Button => LoginFocus::Password,
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, LoginFocus::Button)
    }
}

/// Registration form focus state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegisterFocus {
    #[default]
    FirstName,
    LastName,
    Email,
    Button,
}

impl RegisterFocus {
    pub fn next(&self) -> Self {
        match self {
            RegisterFocus::FirstName => RegisterFocus::LastName,
            RegisterFocus::LastName => RegisterFocus::Email,
            RegisterFocus::Email => RegisterFocus::Button,
            RegisterFocus::Button => RegisterFocus::FirstName,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            RegisterFocus::FirstName => RegisterFocus::Button,
            RegisterFocus::LastName => RegisterFocus::FirstName,
            RegisterFocus::Email => RegisterFocus::LastName,
            RegisterFocus::Button => RegisterFocus::Email,
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, RegisterFocus::Button)
    }
}

/// Set-password form focus state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetPasswordFocus {
    #[default]
    Password,
    Button,
}

impl SetPasswordFocus {
    pub fn toggle(&self) -> Self {
        match self {
            SetPasswordFocus::Password => SetPasswordFocus::Button,
            SetPasswordFocus::Button => SetPasswordFocus::Password,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, SetPasswordFocus::Password)
    }
}

/// Add/edit article form focus state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArticleFocus {
    #[default]
    Title,
    Content,
    SaveDraft,
    Publish,
}

impl ArticleFocus {
    pub fn next(&self) -> Self {
        match self {
            ArticleFocus::Title => ArticleFocus::Content,
            ArticleFocus::Content => ArticleFocus::SaveDraft,
            ArticleFocus::SaveDraft => ArticleFocus::Publish,
            ArticleFocus::Publish => ArticleFocus::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            ArticleFocus::Title => ArticleFocus::Publish,
            ArticleFocus::Content => ArticleFocus::Title,
            ArticleFocus::SaveDraft => ArticleFocus::Content,
            ArticleFocus::Publish => ArticleFocus::SaveDraft,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ArticleFocus::Title | ArticleFocus::Content)
    }
}

// ============================================================================
// Form State
// ============================================================================

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginFocus,
    pub error: Option<FieldError>,
}

#[derive(Debug, Default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub focus: RegisterFocus,
    pub error: Option<FieldError>,
}

impl RegisterForm {
    pub fn request(&self) -> RegisterRequest {
        RegisterRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SetPasswordForm {
    pub password: String,
    pub focus: SetPasswordFocus,
    pub error: Option<FieldError>,
}

#[derive(Debug, Default)]
pub struct ArticleForm {
    /// Id of the article being edited; `None` when writing a new one
    pub editing: Option<String>,
    pub title: String,
    pub content: String,
    /// Status the article had when loaded for editing
    pub status: ArticleStatus,
    pub focus: ArticleFocus,
    pub error: Option<FieldError>,
    /// Edit forms stay read-only until the article arrives
    pub loaded: bool,
}

impl ArticleForm {
    pub fn new_article() -> Self {
        Self {
            loaded: true,
            ..Default::default()
        }
    }

    pub fn for_edit(id: String) -> Self {
        Self {
            editing: Some(id),
            ..Default::default()
        }
    }

    pub fn prefill(&mut self, article: &Article) {
        let draft = ArticleDraft::from_article(article);
        self.title = draft.title;
        self.content = draft.content;
        self.status = draft.status;
        self.loaded = true;
    }

    pub fn draft(&self, status: ArticleStatus) -> ArticleDraft {
        ArticleDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            status,
        }
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent from spawned request tasks back to the UI task.
enum TaskResult {
    LoggedIn(Result<LoginResponse, ApiError>),
    Registered(Result<MessageResponse, ApiError>),
    /// The link token becomes the session token on success
    PasswordSet {
        link_token: String,
        result: Result<SetPasswordResponse, ApiError>,
    },
    Articles(Result<Vec<Article>, ApiError>),
    /// Single article, for the detail view or to prefill the edit form
    Article {
        id: String,
        result: Result<Article, ApiError>,
    },
    Saved {
        editing: bool,
        status: ArticleStatus,
        result: Result<MessageResponse, ApiError>,
    },
    Deleted(Result<MessageResponse, ApiError>),
}

impl TaskResult {
    /// A 401 from a request that needed the session. Login and set-password
    /// run without one and are handled by [`guest_failure`].
    fn is_session_rejection(&self) -> bool {
        let error = match self {
            TaskResult::Articles(Err(e))
            | TaskResult::Article { result: Err(e), .. }
            | TaskResult::Saved { result: Err(e), .. }
            | TaskResult::Deleted(Err(e)) => e,
            _ => return false,
        };
        error.is_unauthorized()
    }
}

/// A finished request together with the token it was sent with
struct TaskMessage {
    token: Option<String>,
    result: TaskResult,
}

/// Open the configured session backend.
/// `ephemeral` keeps the session in memory only.
pub fn open_storage(config: &Config, ephemeral: bool) -> Result<Box<dyn SessionStorage>> {
    if ephemeral {
        return Ok(Box::new(MemoryStorage::new()));
    }
    match config.storage {
        StorageBackend::File => {
            let dir = Config::data_dir().context("Failed to locate the session directory")?;
            Ok(Box::new(FileStorage::in_dir(&dir)))
        }
        StorageBackend::Keyring => Ok(Box::new(KeyringStorage::new())),
    }
}

pub struct App {
    // Core services
    pub config: Config,
    pub store: SessionStore<Box<dyn SessionStorage>>,
    pub nav: Navigator,
    pub api: ApiClient,
    pub toasts: Toasts,

    // UI State
    pub state: AppState,
    pub home_selection: usize,

    // Forms
    pub login: LoginForm,
    pub register: RegisterForm,
    pub set_password: SetPasswordForm,
    pub article_form: ArticleForm,

    // Article data
    pub articles: Vec<Article>,
    pub article_selection: usize,
    pub article: Option<Article>,
    pub detail_scroll: u16,

    /// Requests still running
    in_flight: usize,

    // Background task channel
    task_rx: mpsc::Receiver<TaskMessage>,
    task_tx: mpsc::Sender<TaskMessage>,
}

impl App {
    /// Create the application. The session starts `Unknown`; call
    /// [`initialize_session`](Self::initialize_session) once the first frame is up.
    pub fn new(config: Config, storage: Box<dyn SessionStorage>) -> Result<Self> {
        let api = ApiClient::new(&config.api_base_url).context("Failed to create API client")?;
        debug!(base_url = %api.base_url(), "API client ready");

        let nav = Navigator::new(RouteGuard::new(config.unauthenticated_redirect));
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let login = LoginForm {
            email: config.last_email.clone().unwrap_or_default(),
            ..Default::default()
        };

        Ok(Self {
            config,
            store: SessionStore::new(storage),
            nav,
            api,
            toasts: Toasts::new(),

            state: AppState::Normal,
            home_selection: 0,

            login,
            register: RegisterForm::default(),
            set_password: SetPasswordForm::default(),
            article_form: ArticleForm::new_article(),

            articles: Vec::new(),
            article_selection: 0,
            article: None,
            detail_scroll: 0,

            in_flight: 0,

            task_rx: rx,
            task_tx: tx,
        })
    }

    // =========================================================================
    // Session & Navigation
    // =========================================================================

    /// Restore the persisted session and re-resolve the current route
    pub fn initialize_session(&mut self) {
        let state = self.store.initialize();
        info!(?state, "Session initialized");
        self.sync_token();
        self.nav.refresh(&mut self.store);
        self.enter_current();
    }

    /// Navigate to `route` through the guard and load whatever it shows
    pub fn open(&mut self, route: Route) {
        self.nav.navigate(route, &mut self.store);
        // A guard redirect may have logged out
        self.sync_token();
        self.enter_current();
    }

    pub fn go_back(&mut self) {
        self.nav.back(&mut self.store);
        self.sync_token();
        self.enter_current();
    }

    /// Route being rendered; `None` while the session is still unknown
    pub fn visible_route(&self) -> Option<&Route> {
        self.nav.visible()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.store.logout() {
            warn!(error = %e, "Failed to clear persisted session");
        }
        self.sync_token();
        self.articles.clear();
        self.article = None;
        self.nav.clear_history();
        self.toasts.push_success("Logged out");
        self.open(Route::Home);
    }

    /// Keep the API client's bearer token equal to the session's
    fn sync_token(&mut self) {
        match self.store.token() {
            Some(token) => self.api.set_token(token.to_string()),
            None => self.api.clear_token(),
        }
    }

    /// Reset view state and start loads for the route that just became visible
    fn enter_current(&mut self) {
        let Some(route) = self.nav.visible().cloned() else {
            return;
        };
        self.detail_scroll = 0;

        match route {
            Route::Home => {
                self.home_selection = 0;
            }
            Route::Login => {
                self.login.password.clear();
                self.login.error = None;
                self.login.focus = if self.login.email.is_empty() {
                    LoginFocus::Email
                } else {
                    LoginFocus::Password
                };
            }
            Route::Register => {
                self.register.error = None;
                self.register.focus = RegisterFocus::FirstName;
            }
            Route::SetPassword { .. } => {
                self.set_password = SetPasswordForm::default();
            }
            Route::Articles => self.load_articles(),
            Route::Article { id } => {
                if self.article.as_ref().map(|a| a.id.as_str()) != Some(id.as_str()) {
                    self.article = None;
                }
                self.fetch_article(id);
            }
            Route::AddArticle => {
                self.article_form = ArticleForm::new_article();
            }
            Route::EditArticle { id } => {
                self.article_form = ArticleForm::for_edit(id.clone());
                self.fetch_article(id);
            }
        }
    }

    // =========================================================================
    // Home
    // =========================================================================

    pub fn home_actions(&self) -> Vec<HomeAction> {
        if self.is_authenticated() {
            vec![HomeAction::Articles, HomeAction::NewArticle, HomeAction::Logout]
        } else {
            vec![HomeAction::Login, HomeAction::Register, HomeAction::Articles]
        }
    }

    pub fn activate_home_action(&mut self) {
        let Some(action) = self.home_actions().get(self.home_selection).copied() else {
            return;
        };
        match action {
            HomeAction::Login => self.open(Route::Login),
            HomeAction::Register => self.open(Route::Register),
            HomeAction::Articles => self.open(Route::Articles),
            HomeAction::NewArticle => self.open(Route::AddArticle),
            HomeAction::Logout => self.logout(),
        }
    }

    // =========================================================================
    // Articles
    // =========================================================================

    pub fn selected_article(&self) -> Option<&Article> {
        self.articles.get(self.article_selection)
    }

    pub fn open_selected_article(&mut self) {
        if let Some(id) = self.selected_article().map(|a| a.id.clone()) {
            self.article = None;
            self.open(Route::Article { id });
        }
    }

    /// Edit and delete are only offered to the article's author
    pub fn can_modify_article(&self) -> bool {
        match (&self.article, self.store.user()) {
            (Some(article), Some(user)) => article.is_authored_by(user),
            _ => false,
        }
    }

    pub fn edit_current_article(&mut self) {
        if !self.can_modify_article() {
            return;
        }
        if let Some(id) = self.article.as_ref().map(|a| a.id.clone()) {
            self.open(Route::EditArticle { id });
        }
    }

    pub fn request_delete(&mut self) {
        if self.can_modify_article() {
            self.state = AppState::ConfirmingDelete;
        }
    }

    pub fn load_articles(&mut self) {
        let api = self.api.clone();
        self.spawn_task(async move { TaskResult::Articles(api.list_articles().await) });
    }

    /// Reload whatever the current view shows
    pub fn reload(&mut self) {
        match self.nav.visible().cloned() {
            Some(Route::Articles) => self.load_articles(),
            Some(Route::Article { id }) => self.fetch_article(id),
            _ => {}
        }
    }

    fn fetch_article(&mut self, id: String) {
        let api = self.api.clone();
        self.spawn_task(async move {
            let result = api.get_article(&id).await;
            TaskResult::Article { id, result }
        });
    }

    pub fn delete_article(&mut self) {
        self.state = AppState::Normal;
        if !self.can_modify_article() {
            return;
        }
        let Some(id) = self.article.as_ref().map(|a| a.id.clone()) else {
            return;
        };
        let api = self.api.clone();
        self.spawn_task(async move { TaskResult::Deleted(api.delete_article(&id).await) });
    }

    // =========================================================================
    // Form Submission
    // =========================================================================

    pub fn submit_login(&mut self) {
        self.login.error = None;
        if let Err(field) = validation::validate_login(&self.login.email, &self.login.password) {
            self.handle_failure(field.into());
            return;
        }
        let api = self.api.clone();
        let email = self.login.email.trim().to_string();
        let password = self.login.password.clone();
        self.spawn_task(async move { TaskResult::LoggedIn(api.login(&email, &password).await) });
    }

    pub fn submit_register(&mut self) {
        self.register.error = None;
        let request = self.register.request();
        if let Err(field) = validation::validate_register(&request) {
            self.handle_failure(field.into());
            return;
        }
        let api = self.api.clone();
        self.spawn_task(async move { TaskResult::Registered(api.register(&request).await) });
    }

    pub fn submit_set_password(&mut self) {
        self.set_password.error = None;
        let Some(Route::SetPassword { token }) = self.nav.visible().cloned() else {
            return;
        };
        if let Err(field) = validation::validate_set_password(&self.set_password.password) {
            self.handle_failure(field.into());
            return;
        }
        let api = self.api.clone();
        let password = self.set_password.password.clone();
        self.spawn_task(async move {
            let result = api.set_password(&token, &password).await;
            TaskResult::PasswordSet {
                link_token: token,
                result,
            }
        });
    }

    pub fn submit_article(&mut self, status: ArticleStatus) {
        self.article_form.error = None;
        if !self.article_form.loaded {
            return;
        }
        let draft = self.article_form.draft(status);
        if let Err(field) = validation::validate_article(&draft) {
            self.handle_failure(field.into());
            return;
        }
        let api = self.api.clone();
        match self.article_form.editing.clone() {
            Some(id) => self.spawn_task(async move {
                TaskResult::Saved {
                    editing: true,
                    status,
                    result: api.update_article(&id, &draft).await,
                }
            }),
            None => self.spawn_task(async move {
                TaskResult::Saved {
                    editing: false,
                    status,
                    result: api.create_article(&draft).await,
                }
            }),
        }
    }

    // =========================================================================
    // Background Tasks
    // =========================================================================

    fn spawn_task<F>(&mut self, task: F)
    where
        F: Future<Output = TaskResult> + Send + 'static,
    {
        let tx = self.task_tx.clone();
        let token = self.store.token().map(str::to_string);
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = task.await;
            if tx.send(TaskMessage { token, result }).await.is_err() {
                debug!("UI closed before request finished");
            }
        });
    }

    /// Drain finished requests and expire old toasts. Called once per frame.
    pub fn check_background_tasks(&mut self) {
        let mut messages = Vec::new();
        while let Ok(message) = self.task_rx.try_recv() {
            messages.push(message);
        }

        for message in messages {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.deliver(message);
        }

        self.toasts.prune(Utc::now());
    }

    /// Process a finished request. A 401 for a token that is no longer the
    /// session's says nothing about the current session and is dropped.
    fn deliver(&mut self, message: TaskMessage) {
        if message.result.is_session_rejection()
            && message.token.as_deref() != self.store.token()
        {
            debug!("Ignoring 401 for a session that has since changed");
            return;
        }
        self.process_task_result(message.result);
    }

    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::LoggedIn(Ok(response)) => {
                self.login.password.clear();
                self.start_session(&response.token, response.user);
                self.remember_email();
                self.toasts.push_success(non_empty_or(response.message, "Login successful"));
                self.nav.clear_history();
                self.open(Route::Articles);
            }
            TaskResult::LoggedIn(Err(e)) => {
                error!(error = %e, "Login failed");
                self.handle_failure(guest_failure(e, "Invalid email or password"));
            }
            TaskResult::Registered(Ok(response)) => {
                self.register = RegisterForm::default();
                self.toasts.push_success(non_empty_or(
                    response.message,
                    "Registration successful. Check your email to set a password.",
                ));
            }
            TaskResult::Registered(Err(e)) => {
                error!(error = %e, "Registration failed");
                self.handle_failure(e.into());
            }
            TaskResult::PasswordSet { link_token, result: Ok(response) } => {
                self.set_password = SetPasswordForm::default();
                self.start_session(&link_token, response.user.unwrap_or_default());
                self.toasts.push_success(non_empty_or(response.message, "Password set"));
                self.nav.clear_history();
                self.open(Route::Articles);
            }
            TaskResult::PasswordSet { result: Err(e), .. } => {
                error!(error = %e, "Setting password failed");
                self.handle_failure(guest_failure(e, "This link is invalid or has expired"));
            }
            TaskResult::Articles(Ok(articles)) => {
                debug!(count = articles.len(), "Articles loaded");
                self.articles = articles;
                if self.article_selection >= self.articles.len() {
                    self.article_selection = self.articles.len().saturating_sub(1);
                }
            }
            TaskResult::Articles(Err(e)) => {
                error!(error = %e, "Failed to load articles");
                self.handle_failure(e.into());
            }
            TaskResult::Article { id, result: Ok(article) } => match self.nav.visible() {
                Some(Route::Article { id: current }) if *current == id => {
                    self.article = Some(article);
                }
                Some(Route::EditArticle { id: current }) if *current == id => {
                    if !self.article_form.loaded {
                        self.article_form.prefill(&article);
                    }
                    self.article = Some(article);
                }
                _ => debug!(article_id = %id, "Dropping article for a view no longer shown"),
            },
            TaskResult::Article { id, result: Err(e) } => {
                error!(article_id = %id, error = %e, "Failed to load article");
                self.handle_failure(e.into());
            }
            TaskResult::Saved { editing, status, result: Ok(_) } => {
                let message = if editing {
                    "Article updated successfully!"
                } else if status == ArticleStatus::Draft {
                    "Draft saved"
                } else {
                    "Article submitted successfully!"
                };
                self.toasts.push_success(message);
                self.article_form = ArticleForm::new_article();
                self.nav.clear_history();
                self.open(Route::Articles);
            }
            TaskResult::Saved { editing, result: Err(e), .. } => {
                error!(editing, error = %e, "Failed to save article");
                self.handle_failure(e.into());
            }
            TaskResult::Deleted(Ok(response)) => {
                self.article = None;
                self.toasts.push_success(non_empty_or(response.message, "Article deleted"));
                self.nav.clear_history();
                self.open(Route::Articles);
            }
            TaskResult::Deleted(Err(e)) => {
                error!(error = %e, "Failed to delete article");
                self.handle_failure(e.into());
            }
        }
    }

    fn start_session(&mut self, token: &str, user: User) {
        if let Err(e) = self.store.login(token, user) {
            warn!(error = %e, "Session could not be persisted");
            self.toasts
                .push_error("Logged in, but the session will not survive a restart");
        }
        self.sync_token();
    }

    /// Store the login email in the config file without persisting env overrides
    fn remember_email(&mut self) {
        let email = self.login.email.trim().to_string();
        self.config.last_email = Some(email.clone());
        let saved = Config::config_path().and_then(|path| {
            let mut on_disk = Config::load_from(&path)?;
            on_disk.last_email = Some(email);
            on_disk.save_to(&path)
        });
        if let Err(e) = saved {
            warn!(error = %e, "Failed to save config");
        }
    }

    // =========================================================================
    // Failures
    // =========================================================================

    /// Surface a failed action: inline under the field, as a forced logout
    /// and redirect, or as an error toast.
    pub fn handle_failure(&mut self, err: ActionError) {
        let guard = *self.nav.guard();
        match resolve_failure(err, &mut self.store, &guard) {
            Resolution::Inline(field) => self.set_field_error(field),
            Resolution::Redirect(route) => {
                self.sync_token();
                self.articles.clear();
                self.article = None;
                self.state = AppState::Normal;
                self.toasts.push_error("Session expired. Please log in again.");
                self.nav.clear_history();
                self.open(route);
            }
            Resolution::Toast(message) => self.toasts.push_error(message),
        }
    }

    fn set_field_error(&mut self, field: FieldError) {
        match self.nav.visible() {
            Some(Route::Login) => self.login.error = Some(field),
            Some(Route::Register) => self.register.error = Some(field),
            Some(Route::SetPassword { .. }) => self.set_password.error = Some(field),
            Some(Route::AddArticle) | Some(Route::EditArticle { .. }) => {
                self.article_form.error = Some(field)
            }
            _ => self.toasts.push_error(field.message),
        }
    }

    /// True when keystrokes should go to a text field rather than shortcuts
    pub fn is_editing_text(&self) -> bool {
        match self.nav.visible() {
            Some(Route::Login) => self.login.focus.is_text(),
            Some(Route::Register) => self.register.focus.is_text(),
            Some(Route::SetPassword { .. }) => self.set_password.focus.is_text(),
            Some(Route::AddArticle) | Some(Route::EditArticle { .. }) => {
                self.article_form.focus.is_text()
            }
            _ => false,
        }
    }
}

/// Login and set-password run without a session, so a 401 there means bad
/// credentials or a dead link rather than an expired session.
fn guest_failure(err: ApiError, unauthorized_message: &str) -> ActionError {
    if err.is_unauthorized() {
        ActionError::Failed(unauthorized_message.to_string())
    } else {
        err.into()
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

pub fn can_add_email_char(current_len: usize, c: char) -> bool {
    current_len < MAX_EMAIL_LENGTH && is_valid_input_char(c) && !c.is_whitespace()
}

pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

pub fn can_add_name_char(current_len: usize, c: char) -> bool {
    current_len < MAX_NAME_LENGTH && is_valid_input_char(c)
}

pub fn can_add_title_char(current_len: usize, c: char) -> bool {
    current_len < MAX_TITLE_INPUT_LENGTH && is_valid_input_char(c)
}

/// Article bodies may contain line breaks
pub fn can_add_content_char(current_len: usize, c: char) -> bool {
    current_len < MAX_CONTENT_LENGTH && (c == '\n' || is_valid_input_char(c))
}

// ============================================================================
// Tests
// ============================================================================
