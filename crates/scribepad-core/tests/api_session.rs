//! Integration tests for the API client wired to the session store.
//!
//! A wiremock server stands in for the article service.

use scribepad_core::error::{resolve_failure, ActionError, Resolution};
use scribepad_core::models::{ArticleDraft, ArticleStatus, RegisterRequest, User};
use scribepad_core::routes::{NavOutcome, Navigator, Route};
use scribepad_core::session::{AuthState, SessionStore, TOKEN_KEY};
use scribepad_core::{ApiClient, ApiError, MemoryStorage, RouteGuard, SessionStorage};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn logged_in_store(token: &str) -> SessionStore<MemoryStorage> {
    let mut store = SessionStore::new(MemoryStorage::new());
    store.initialize();
    store
        .login(
            token,
            User {
                id: Some("u1".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    store
}

#[tokio::test]
async fn test_login_then_store_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "token": "jwt-abc",
            "user": {"_id": "u1", "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let response = api.login(" ada@example.com ", "secret1").await.unwrap();
    assert_eq!(response.message, "Login successful");

    let mut store = SessionStore::new(MemoryStorage::new());
    store.initialize();
    store.login(&response.token, response.user).unwrap();

    assert_eq!(store.state(), AuthState::Authenticated);
    assert_eq!(
        store.storage().get(TOKEN_KEY).unwrap().as_deref(),
        Some("jwt-abc")
    );
    assert_eq!(store.user().unwrap().full_name(), "Ada Lovelace");
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let err = api.login("ada@example.com", "wrong-pass").await.unwrap_err();
    assert_eq!(
        ActionError::from(err),
        ActionError::Failed("Invalid credentials".to_string())
    );
}

#[tokio::test]
async fn test_protected_call_sends_bearer_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article/all"))
        .and(header("Authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [
                {"_id": "a1", "title": "First", "content": "Body of the first", "author": "u1"},
                {"_id": "a2", "title": "Second", "content": "Body of the second", "articleStatus": "draft"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap().with_token("jwt-abc".to_string());
    let articles = api.list_articles().await.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[1].article_status, ArticleStatus::Draft);
}

#[tokio::test]
async fn test_401_forces_logout_and_redirect_to_login() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article/a1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
        .mount(&server)
        .await;

    let mut store = logged_in_store("stale");
    let guard = RouteGuard::default();
    let mut nav = Navigator::new(guard);
    nav.navigate(Route::Article { id: "a1".to_string() }, &mut store);
    assert_eq!(nav.visible(), Some(&Route::Article { id: "a1".to_string() }));

    let api = ApiClient::new(&server.uri()).unwrap().with_token("stale".to_string());
    let err = api.get_article("a1").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));

    let resolution = resolve_failure(err.into(), &mut store, &guard);
    assert_eq!(resolution, Resolution::Redirect(Route::Login));
    assert_eq!(store.state(), AuthState::Anonymous);
    assert!(store.storage().is_empty());

    // The article view itself is no longer reachable
    assert_eq!(nav.refresh(&mut store), &NavOutcome::Show(Route::Login));
}

#[tokio::test]
async fn test_set_password_uses_link_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/setpassword"))
        .and(header("Authorization", "Bearer link-token"))
        .and(body_json(json!({"password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Password set successfully",
            "user": {"_id": "u7", "email": "new@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let response = api.set_password("link-token", "secret1").await.unwrap();
    assert_eq!(response.message, "Password set successfully");
    assert_eq!(response.user.unwrap().id.as_deref(), Some("u7"));
}

#[tokio::test]
async fn test_register_sends_form_fields() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_string_contains("Lovelace"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"message": "Check your email to set a password"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let request = RegisterRequest {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
    };
    let response = api.register(&request).await.unwrap();
    assert_eq!(response.message, "Check your email to set a password");
}

#[tokio::test]
async fn test_update_and_delete_article() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/article/update/a1"))
        .and(header("Authorization", "Bearer t"))
        .and(body_string_contains("draft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Article updated"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/article/delete/a1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap().with_token("t".to_string());
    let draft = ArticleDraft {
        title: "Updated title".to_string(),
        content: "Updated body text".to_string(),
        status: ArticleStatus::Draft,
    };
    assert_eq!(api.update_article("a1", &draft).await.unwrap().message, "Article updated");
    assert_eq!(api.delete_article("a1").await.unwrap().message, "");
}

#[tokio::test]
async fn test_server_error_becomes_toast_and_keeps_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/article/create"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let mut store = logged_in_store("t");
    let api = ApiClient::new(&server.uri()).unwrap().with_token("t".to_string());
    let draft = ArticleDraft {
        title: "A title".to_string(),
        content: "Some content here".to_string(),
        status: ArticleStatus::Published,
    };
    let err = api.create_article(&draft).await.unwrap_err();
    let resolution = resolve_failure(err.into(), &mut store, &RouteGuard::default());
    assert_eq!(resolution, Resolution::Toast("Error: 500".to_string()));
    assert!(store.is_authenticated());
}
