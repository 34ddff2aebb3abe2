//! Core library for scribepad.
//!
//! Everything that is not terminal rendering lives here:
//!
//! - `api`: REST client for the article service
//! - `models`: users, articles and the wire wrappers around them
//! - `session`: the session store (token + tri-state authentication)
//! - `storage`: persistent key-value backends for the session
//! - `guard`: the route guard in front of protected views
//! - `routes`: route table and the guarded navigator
//! - `validation`: client-side field checks for every form
//! - `error`: classification of failed user actions
//! - `toast`: short-lived notifications
//! - `config`: on-disk configuration with environment overrides

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod routes;
pub mod session;
pub mod storage;
pub mod toast;
pub mod utils;
pub mod validation;

pub use api::{ApiClient, ApiError};
pub use config::{Config, StorageBackend};
pub use error::{resolve_failure, ActionError, Resolution};
pub use guard::{GuardDecision, RedirectTarget, RouteGuard};
pub use routes::{Access, NavOutcome, Navigator, Route, RouteError};
pub use session::{AuthState, Session, SessionError, SessionStore};
pub use storage::{FileStorage, KeyringStorage, MemoryStorage, SessionStorage, StorageError};
pub use toast::{Toast, ToastKind, Toasts};
pub use validation::FieldError;
