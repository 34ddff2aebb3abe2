//! Session store: the one place that knows whether the user is logged in.
//!
//! The store owns the bearer token, the derived [`AuthState`] and the cached
//! user profile, and mirrors the token and profile into a [`SessionStorage`]
//! backend so the next run can restore them. It never talks to the network:
//! a token is only ever judged invalid by an API call answering 401, at which
//! point the caller logs out.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::User;
use crate::storage::{SessionStorage, StorageError};

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-encoded user profile
pub const USER_KEY: &str = "user";

/// Authentication state of the running client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Boot time, before persisted state has been read
    #[default]
    Unknown,
    Authenticated,
    Anonymous,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: String,
    state: AuthState,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn state(&self) -> AuthState {
        self.state
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Cannot log in with an empty token")]
    EmptyToken,

    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to encode user profile: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct SessionStore<S> {
    storage: S,
    session: Session,
    user: Option<User>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Create a store in the `Unknown` state. Call [`initialize`](Self::initialize) once at startup.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            session: Session::default(),
            user: None,
        }
    }

    /// Restore the session from storage.
    ///
    /// A non-empty persisted token yields `Authenticated`, anything else
    /// `Anonymous`. Unreadable storage counts as no token. Only the first call
    /// reads storage; later calls return the current state.
    pub fn initialize(&mut self) -> AuthState {
        if self.session.state != AuthState::Unknown {
            return self.session.state;
        }

        let token = match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted token, starting logged out");
                None
            }
        };

        match token {
            Some(token) => {
                self.user = self.read_user();
                self.session = Session {
                    token,
                    state: AuthState::Authenticated,
                };
                debug!(has_user = self.user.is_some(), "Restored persisted session");
            }
            None => {
                self.session = Session {
                    token: String::new(),
                    state: AuthState::Anonymous,
                };
                debug!("No persisted session");
            }
        }

        self.session.state
    }

    /// Record a successful login (or password-set).
    ///
    /// The in-memory session is authenticated even if persisting fails; the
    /// error is returned so the caller can tell the user the login won't
    /// survive a restart.
    pub fn login(&mut self, token: &str, user: User) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        self.session = Session {
            token: token.to_string(),
            state: AuthState::Authenticated,
        };
        let encoded = serde_json::to_string(&user);
        self.user = Some(user);
        info!("Logged in");

        // Token first: a profile without a token must never be left behind
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USER_KEY, &encoded?)?;
        Ok(())
    }

    /// Clear the session and its persisted copy. Safe to call repeatedly.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        let was_authenticated = self.is_authenticated();
        self.session = Session {
            token: String::new(),
            state: AuthState::Anonymous,
        };
        self.user = None;
        if was_authenticated {
            info!("Logged out");
        }

        let token_result = self.storage.remove(TOKEN_KEY);
        let user_result = self.storage.remove(USER_KEY);
        token_result?;
        user_result?;
        Ok(())
    }

    pub fn state(&self) -> AuthState {
        self.session.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.state == AuthState::Authenticated
    }

    /// Bearer token for outgoing requests, only while authenticated
    pub fn token(&self) -> Option<&str> {
        if self.is_authenticated() {
            Some(self.session.token.as_str())
        } else {
            None
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read_user(&self) -> Option<User> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted user profile");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Ignoring unparseable persisted user profile");
                None
            }
        }
    }
}
