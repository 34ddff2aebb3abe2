use std::fmt;

use serde::{Deserialize, Serialize};

use super::User;
use crate::utils::format_date;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ArticleStatus {
    Draft,
    #[default]
    Published,
}

impl From<String> for ArticleStatus {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("draft") {
            ArticleStatus::Draft
        } else {
            ArticleStatus::Published
        }
    }
}

impl ArticleStatus {
    /// Wire value for the `articleStatus` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleStatus::Draft => write!(f, "Draft"),
            ArticleStatus::Published => write!(f, "Published"),
        }
    }
}

/// The `author` field is either a bare user id or the populated user document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    Id(String),
    User(User),
}

impl AuthorRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            AuthorRef::Id(id) => Some(id.as_str()),
            AuthorRef::User(user) => user.id.as_deref(),
        }
    }

    pub fn display_name(&self) -> Option<String> {
        match self {
            AuthorRef::Id(_) => None,
            AuthorRef::User(user) => Some(user.display_name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub article_image: Option<String>,
    #[serde(default)]
    pub article_status: ArticleStatus,
    #[serde(default)]
    pub author: Option<AuthorRef>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Article {
    /// Edit and delete are offered only when the logged-in user wrote the article.
    /// Missing ids on either side never match.
    pub fn is_authored_by(&self, user: &User) -> bool {
        match (self.author.as_ref().and_then(AuthorRef::id), user.id.as_deref()) {
            (Some(author), Some(me)) => !author.is_empty() && author == me,
            _ => false,
        }
    }

    pub fn author_name(&self) -> String {
        self.author
            .as_ref()
            .and_then(AuthorRef::display_name)
            .unwrap_or_else(|| "Unknown author".to_string())
    }

    pub fn formatted_date(&self) -> String {
        self.created_at
            .as_deref()
            .map(format_date)
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Body of `POST /article/create` and `PUT /article/update/:id`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub status: ArticleStatus,
}

impl ArticleDraft {
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            content: article.content.clone(),
            status: article.article_status,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlesResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleResponse {
    pub article: Article,
}

/// Resolve an image reference against the configured image base URL.
/// Absolute references are returned unchanged.
pub fn image_url(base: Option<&str>, reference: &str) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return reference.to_string();
    }
    match base {
        Some(base) if !base.is_empty() => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            reference.trim_start_matches('/')
        ),
        _ => reference.to_string(),
    }
}
