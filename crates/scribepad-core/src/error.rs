//! Classification of failed user actions.
//!
//! A failure is either a field validation problem (shown inline), an
//! authorization failure (forces logout and a redirect) or anything else
//! (shown as an error toast).

use thiserror::Error;
use tracing::warn;

use crate::api::ApiError;
use crate::guard::RouteGuard;
use crate::routes::Route;
use crate::session::SessionStore;
use crate::storage::SessionStorage;
use crate::validation::FieldError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("{0}")]
    Validation(FieldError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Failed(String),
}

impl ActionError {
    pub fn from_api(err: ApiError) -> Self {
        if err.is_unauthorized() {
            ActionError::Unauthorized
        } else {
            ActionError::Failed(err.user_message())
        }
    }
}

impl From<ApiError> for ActionError {
    fn from(err: ApiError) -> Self {
        Self::from_api(err)
    }
}

impl From<FieldError> for ActionError {
    fn from(err: FieldError) -> Self {
        ActionError::Validation(err)
    }
}

/// What the UI should do about a failed action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Inline(FieldError),
    Redirect(Route),
    Toast(String),
}

/// Apply the failure to the session and tell the UI how to surface it.
/// Authorization failures log out before redirecting.
pub fn resolve_failure<S: SessionStorage>(
    err: ActionError,
    store: &mut SessionStore<S>,
    guard: &RouteGuard,
) -> Resolution {
    match err {
        ActionError::Validation(field) => Resolution::Inline(field),
        ActionError::Unauthorized => {
            warn!("Server rejected the session token, logging out");
            if let Err(e) = store.logout() {
                warn!(error = %e, "Failed to clear session after 401");
            }
            Resolution::Redirect(guard.redirect_route())
        }
        ActionError::Failed(message) => Resolution::Toast(message),
    }
}
