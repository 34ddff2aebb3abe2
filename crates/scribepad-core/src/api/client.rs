//! API client for the article REST service.
//!
//! One method per endpoint. Non-2xx responses become [`ApiError`]s; nothing is
//! retried, so every failure ends the user action that triggered it.

use std::time::Duration;

use reqwest::{header, multipart, Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{
    Article, ArticleDraft, ArticleResponse, ArticlesResponse, LoginRequest, LoginResponse,
    MessageResponse, RegisterRequest, SetPasswordResponse,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the article service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer_headers(token: &str) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidRequest("Token contains invalid characters".to_string()))?;
        headers.insert(header::AUTHORIZATION, value);
        Ok(headers)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        match self.token {
            Some(ref token) => Self::bearer_headers(token),
            None => Ok(header::HeaderMap::new()),
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let url = response.url().path().to_string();
            let body = response.text().await.unwrap_or_default();
            debug!(%status, url = %url, body = %ApiError::truncate_body(&body), "Request failed");
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check_response(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Like `decode`, but an empty success body is an empty message
    async fn decode_message(response: Response) -> Result<MessageResponse, ApiError> {
        let response = Self::check_response(response).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(MessageResponse::default());
        }
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;
        Self::decode(response).await
    }

    fn draft_form(draft: &ArticleDraft) -> multipart::Form {
        multipart::Form::new()
            .text("title", draft.title.trim().to_string())
            .text("content", draft.content.trim().to_string())
            .text("articleStatus", draft.status.as_str())
    }

    // ===== Auth =====

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.url("/auth/login");
        debug!(url = %url, "POST login");
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = self.client.post(&url).json(&body).send().await?;
        let login: LoginResponse = Self::decode(response).await?;
        if login.token.is_empty() {
            return Err(ApiError::InvalidResponse("Login response has no token".to_string()));
        }
        Ok(login)
    }

    /// Register a new account. The server answers 201 and emails a set-password link.
    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        let url = self.url("/auth/register");
        debug!(url = %url, "POST register");
        let form = multipart::Form::new()
            .text("firstName", request.first_name.trim().to_string())
            .text("lastName", request.last_name.trim().to_string())
            .text("email", request.email.trim().to_string());
        let response = self.client.post(&url).multipart(form).send().await?;
        Self::decode_message(response).await
    }

    /// Set a password using the token from an emailed link
    pub async fn set_password(
        &self,
        link_token: &str,
        password: &str,
    ) -> Result<SetPasswordResponse, ApiError> {
        let url = self.url("/auth/setpassword");
        debug!(url = %url, "POST setpassword");
        let response = self
            .client
            .post(&url)
            .headers(Self::bearer_headers(link_token)?)
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;
        Self::decode(response).await
    }

    // ===== Articles =====

    pub async fn list_articles(&self) -> Result<Vec<Article>, ApiError> {
        let response: ArticlesResponse = self.get("/article/all").await?;
        Ok(response.articles)
    }

    pub async fn get_article(&self, id: &str) -> Result<Article, ApiError> {
        let response: ArticleResponse = self.get(&format!("/article/{}", id)).await?;
        Ok(response.article)
    }

    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<MessageResponse, ApiError> {
        let url = self.url("/article/create");
        debug!(url = %url, status = draft.status.as_str(), "POST article");
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .multipart(Self::draft_form(draft))
            .send()
            .await?;
        Self::decode_message(response).await
    }

    pub async fn update_article(
        &self,
        id: &str,
        draft: &ArticleDraft,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.url(&format!("/article/update/{}", id));
        debug!(url = %url, status = draft.status.as_str(), "PUT article");
        let response = self
            .client
            .put(&url)
            .headers(self.auth_headers()?)
            .multipart(Self::draft_form(draft))
            .send()
            .await?;
        Self::decode_message(response).await
    }

    pub async fn delete_article(&self, id: &str) -> Result<MessageResponse, ApiError> {
        let url = self.url(&format!("/article/delete/{}", id));
        debug!(url = %url, "DELETE article");
        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;
        Self::decode_message(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/article/all"), "http://localhost:3000/article/all");
    }

    #[test]
    fn test_with_token_shares_base_url() {
        let client = ApiClient::new("http://api").unwrap();
        assert!(!client.has_token());
        let authed = client.with_token("t".to_string());
        assert!(authed.has_token());
        assert_eq!(authed.base_url(), "http://api");
    }

    #[test]
    fn test_bearer_header_rejects_newlines() {
        assert!(matches!(
            ApiClient::bearer_headers("bad\ntoken"),
            Err(ApiError::InvalidRequest(_))
        ));
        let headers = ApiClient::bearer_headers("abc").unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer abc");
    }
}
