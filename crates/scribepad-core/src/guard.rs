//! Route guard for views that need a logged-in user.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::routes::Route;
use crate::session::{AuthState, SessionStore};
use crate::storage::SessionStorage;

/// Where unauthenticated visitors of a protected view are sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectTarget {
    #[default]
    Login,
    Home,
}

impl RedirectTarget {
    pub fn route(self) -> Route {
        match self {
            RedirectTarget::Login => Route::Login,
            RedirectTarget::Home => Route::Home,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Authentication state not known yet; render nothing
    Pending,
    Redirect(Route),
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard {
    redirect: RedirectTarget,
}

impl RouteGuard {
    pub fn new(redirect: RedirectTarget) -> Self {
        Self { redirect }
    }

    /// Route that anonymous visitors land on
    pub fn redirect_route(&self) -> Route {
        self.redirect.route()
    }

    pub fn decide(&self, state: AuthState) -> GuardDecision {
        match state {
            AuthState::Unknown => GuardDecision::Pending,
            AuthState::Anonymous => GuardDecision::Redirect(self.redirect.route()),
            AuthState::Authenticated => GuardDecision::Render,
        }
    }

    /// Decide, and log the session out when redirecting so no stale token
    /// or profile survives.
    pub fn enforce<S: SessionStorage>(&self, store: &mut SessionStore<S>) -> GuardDecision {
        let decision = self.decide(store.state());
        if matches!(decision, GuardDecision::Redirect(_)) {
            if let Err(e) = store.logout() {
                warn!(error = %e, "Failed to clear session while redirecting");
            }
        }
        decision
    }
}
