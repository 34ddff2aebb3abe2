//! Data models for the article service.
//!
//! - `User`: the display-only profile returned on login / password-set
//! - `Article`, `ArticleStatus`, `AuthorRef`: articles and their authorship
//! - `ArticleDraft`: the create/update payload
//! - Request/response wrappers for the auth endpoints

pub mod article;
pub mod auth;
pub mod user;

pub use article::{
    image_url, Article, ArticleDraft, ArticleResponse, ArticleStatus, ArticlesResponse, AuthorRef,
};
pub use auth::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, SetPasswordResponse};
pub use user::User;
