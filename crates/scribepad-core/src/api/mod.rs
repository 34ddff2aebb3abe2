//! REST API client module for the article service.
//!
//! This module provides the `ApiClient` for the auth endpoints
//! (login, register, set-password) and the article CRUD endpoints.
//! Protected endpoints take a bearer token obtained from login or from a
//! set-password link.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
