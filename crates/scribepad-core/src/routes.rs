//! Route table and the guarded navigator.
//!
//! Every screen of the client is a [`Route`] with a canonical path, so links
//! such as the emailed set-password URL can be opened directly. The
//! [`Navigator`] is the only way the UI changes screens: protected routes pass
//! through the [`RouteGuard`], and guest-only routes (login, register,
//! set-password) bounce logged-in users to the article list.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::guard::{GuardDecision, RouteGuard};
use crate::session::SessionStore;
use crate::storage::SessionStorage;

/// Maximum number of routes kept for going back
const MAX_HISTORY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    SetPassword { token: String },
    Articles,
    Article { id: String },
    AddArticle,
    EditArticle { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Only meaningful while logged out
    GuestOnly,
    Protected,
}

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("No such page: {0}")]
    Unknown(String),

    #[error("Invalid link: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Route {
    /// Parse a path (`/article/42`) or a full link (`https://host/setPassword/abc`)
    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let input = input.trim();
        let path = if input.starts_with("http://") || input.starts_with("https://") {
            url::Url::parse(input)?.path().to_string()
        } else {
            input.to_string()
        };

        let trimmed = path.trim_end_matches('/');
        let rest = match trimmed.strip_prefix('/') {
            Some(rest) => rest,
            None if trimmed.is_empty() => "",
            None => return Err(RouteError::Unknown(input.to_string())),
        };

        let segments: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        if segments.iter().any(|s| s.is_empty()) {
            return Err(RouteError::Unknown(input.to_string()));
        }

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["setPassword", token] => Route::SetPassword {
                token: (*token).to_string(),
            },
            ["articles"] => Route::Articles,
            ["addarticle"] => Route::AddArticle,
            ["article", "update", id] => Route::EditArticle {
                id: (*id).to_string(),
            },
            ["article", id] => Route::Article {
                id: (*id).to_string(),
            },
            _ => return Err(RouteError::Unknown(input.to_string())),
        };
        Ok(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::SetPassword { token } => format!("/setPassword/{}", token),
            Route::Articles => "/articles".to_string(),
            Route::Article { id } => format!("/article/{}", id),
            Route::AddArticle => "/addarticle".to_string(),
            Route::EditArticle { id } => format!("/article/update/{}", id),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Home => Access::Public,
            Route::Login | Route::Register | Route::SetPassword { .. } => Access::GuestOnly,
            Route::Articles
            | Route::Article { .. }
            | Route::AddArticle
            | Route::EditArticle { .. } => Access::Protected,
        }
    }

    /// Title shown in the title bar
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::SetPassword { .. } => "Set New Password",
            Route::Articles => "Articles",
            Route::Article { .. } => "Article",
            Route::AddArticle => "Add New Article",
            Route::EditArticle { .. } => "Update Article",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// What the content area should show after navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Session not initialized yet; render nothing
    Pending,
    Show(Route),
}

pub struct Navigator {
    guard: RouteGuard,
    /// Requested route while pending, resolved route otherwise
    current: Route,
    outcome: NavOutcome,
    history: Vec<Route>,
}

impl Navigator {
    pub fn new(guard: RouteGuard) -> Self {
        Self {
            guard,
            current: Route::Home,
            outcome: NavOutcome::Show(Route::Home),
            history: Vec::new(),
        }
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn outcome(&self) -> &NavOutcome {
        &self.outcome
    }

    /// Route to render, or `None` while pending
    pub fn visible(&self) -> Option<&Route> {
        match &self.outcome {
            NavOutcome::Pending => None,
            NavOutcome::Show(route) => Some(route),
        }
    }

    /// Go to `route`, recording the current screen for [`back`](Self::back)
    pub fn navigate<S: SessionStorage>(
        &mut self,
        route: Route,
        store: &mut SessionStore<S>,
    ) -> &NavOutcome {
        let previous = self.current.clone();
        self.apply(route, store);
        if previous != self.current && matches!(self.outcome, NavOutcome::Show(_)) {
            self.history.push(previous);
            if self.history.len() > MAX_HISTORY {
                self.history.remove(0);
            }
        }
        &self.outcome
    }

    /// Re-evaluate the current route, e.g. after the session initialized or
    /// was logged out
    pub fn refresh<S: SessionStorage>(&mut self, store: &mut SessionStore<S>) -> &NavOutcome {
        let current = self.current.clone();
        self.apply(current, store);
        &self.outcome
    }

    /// Return to the previous screen. With no history this is the article
    /// list for a signed-in user and Home for anyone else.
    pub fn back<S: SessionStorage>(&mut self, store: &mut SessionStore<S>) -> &NavOutcome {
        let target = match self.history.pop() {
            Some(route) => route,
            None if store.is_authenticated() => Route::Articles,
            None => Route::Home,
        };
        self.apply(target, store);
        &self.outcome
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn apply<S: SessionStorage>(&mut self, requested: Route, store: &mut SessionStore<S>) {
        let resolved = match requested.access() {
            Access::Public => Some(requested.clone()),
            Access::GuestOnly => {
                if store.is_authenticated() {
                    Some(Route::Articles)
                } else {
                    Some(requested.clone())
                }
            }
            Access::Protected => match self.guard.enforce(store) {
                GuardDecision::Pending => None,
                GuardDecision::Redirect(target) => Some(target),
                GuardDecision::Render => Some(requested.clone()),
            },
        };

        match resolved {
            Some(route) => {
                if route != requested {
                    debug!(requested = requested.title(), resolved = route.title(), "Redirected");
                }
                self.current = route.clone();
                self.outcome = NavOutcome::Show(route);
            }
            None => {
                self.current = requested;
                self.outcome = NavOutcome::Pending;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::RedirectTarget;
    use crate::models::User;
    use crate::storage::MemoryStorage;

    fn anonymous_store() -> SessionStore<MemoryStorage> {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.initialize();
        store
    }

    fn logged_in_store() -> SessionStore<MemoryStorage> {
        let mut store = anonymous_store();
        store.login("token", User::default()).unwrap();
        store
    }

    // -------------------------------------------------------------------------
    // Route parsing
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_static_routes() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(Route::parse("").unwrap(), Route::Home);
        assert_eq!(Route::parse("/login").unwrap(), Route::Login);
        assert_eq!(Route::parse("/register/").unwrap(), Route::Register);
        assert_eq!(Route::parse("/articles").unwrap(), Route::Articles);
        assert_eq!(Route::parse("/addarticle").unwrap(), Route::AddArticle);
    }

    #[test]
    fn test_parse_parameterized_routes() {
        assert_eq!(
            Route::parse("/setPassword/abc.def").unwrap(),
            Route::SetPassword {
                token: "abc.def".to_string()
            }
        );
        assert_eq!(
            Route::parse("/article/42").unwrap(),
            Route::Article { id: "42".to_string() }
        );
        assert_eq!(
            Route::parse("/article/update/42").unwrap(),
            Route::EditArticle { id: "42".to_string() }
        );
    }

    #[test]
    fn test_parse_full_link() {
        assert_eq!(
            Route::parse("https://articles.example.com/setPassword/tok123").unwrap(),
            Route::SetPassword {
                token: "tok123".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_empty_params() {
        assert!(matches!(Route::parse("/nope"), Err(RouteError::Unknown(_))));
        assert!(matches!(Route::parse("/setPassword/"), Err(RouteError::Unknown(_))));
        assert!(matches!(Route::parse("//login"), Err(RouteError::Unknown(_))));
        assert!(matches!(Route::parse("login"), Err(RouteError::Unknown(_))));
        assert!(matches!(Route::parse("http://"), Err(RouteError::InvalidUrl(_))));
    }

    #[test]
    fn test_path_round_trip() {
        let routes = [
            Route::Home,
            Route::SetPassword { token: "t".to_string() },
            Route::EditArticle { id: "9".to_string() },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()).unwrap(), route);
        }
    }

    #[test]
    fn test_access_levels() {
        assert_eq!(Route::Home.access(), Access::Public);
        assert_eq!(Route::Login.access(), Access::GuestOnly);
        assert_eq!(Route::AddArticle.access(), Access::Protected);
    }

    // -------------------------------------------------------------------------
    // Navigator
    // -------------------------------------------------------------------------

    #[test]
    fn test_protected_route_pending_before_initialize() {
        let mut store = SessionStore::new(MemoryStorage::new());
        let mut nav = Navigator::new(RouteGuard::default());
        assert_eq!(nav.navigate(Route::Articles, &mut store), &NavOutcome::Pending);
        assert!(nav.visible().is_none());
        assert_eq!(nav.current(), &Route::Articles);

        store.initialize();
        assert_eq!(
            nav.refresh(&mut store),
            &NavOutcome::Show(Route::Login)
        );
    }

    #[test]
    fn test_pending_resolves_to_requested_route_when_token_persisted() {
        let storage = MemoryStorage::new().with_entry("token", "t");
        let mut store = SessionStore::new(storage);
        let mut nav = Navigator::new(RouteGuard::default());
        nav.navigate(Route::Article { id: "7".to_string() }, &mut store);

        store.initialize();
        assert_eq!(
            nav.refresh(&mut store),
            &NavOutcome::Show(Route::Article { id: "7".to_string() })
        );
    }

    #[test]
    fn test_protected_route_redirects_anonymous() {
        let mut store = anonymous_store();
        let mut nav = Navigator::new(RouteGuard::default());
        assert_eq!(
            nav.navigate(Route::AddArticle, &mut store),
            &NavOutcome::Show(Route::Login)
        );

        let mut nav = Navigator::new(RouteGuard::new(RedirectTarget::Home));
        assert_eq!(
            nav.navigate(Route::AddArticle, &mut store),
            &NavOutcome::Show(Route::Home)
        );
    }

    #[test]
    fn test_guest_only_route_bounces_logged_in_user() {
        let mut store = logged_in_store();
        let mut nav = Navigator::new(RouteGuard::default());
        assert_eq!(
            nav.navigate(Route::Login, &mut store),
            &NavOutcome::Show(Route::Articles)
        );
        assert_eq!(
            nav.navigate(Route::SetPassword { token: "x".to_string() }, &mut store),
            &NavOutcome::Show(Route::Articles)
        );
    }

    #[test]
    fn test_refresh_after_logout_redirects() {
        let mut store = logged_in_store();
        let mut nav = Navigator::new(RouteGuard::default());
        nav.navigate(Route::Articles, &mut store);
        assert_eq!(nav.visible(), Some(&Route::Articles));

        store.logout().unwrap();
        assert_eq!(nav.refresh(&mut store), &NavOutcome::Show(Route::Login));
    }

    #[test]
    fn test_back_pops_history() {
        let mut store = logged_in_store();
        let mut nav = Navigator::new(RouteGuard::default());
        nav.navigate(Route::Articles, &mut store);
        nav.navigate(Route::Article { id: "1".to_string() }, &mut store);
        nav.navigate(Route::EditArticle { id: "1".to_string() }, &mut store);

        assert_eq!(
            nav.back(&mut store),
            &NavOutcome::Show(Route::Article { id: "1".to_string() })
        );
        assert_eq!(nav.back(&mut store), &NavOutcome::Show(Route::Articles));
        assert_eq!(nav.back(&mut store), &NavOutcome::Show(Route::Home));
        // Empty history falls back to the article list
        assert_eq!(nav.back(&mut store), &NavOutcome::Show(Route::Articles));
    }

    #[test]
    fn test_back_without_history_stays_home_for_anonymous() {
        let mut store = anonymous_store();
        let mut nav = Navigator::new(RouteGuard::default());

        assert_eq!(nav.back(&mut store), &NavOutcome::Show(Route::Home));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut store = logged_in_store();
        let mut nav = Navigator::new(RouteGuard::default());
        for i in 0..(MAX_HISTORY + 10) {
            nav.navigate(Route::Article { id: i.to_string() }, &mut store);
        }
        assert_eq!(nav.history.len(), MAX_HISTORY);
    }
}
