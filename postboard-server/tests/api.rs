//! End-to-end tests against the axum router and an in-memory database

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use postboard_server::db::{create_memory_pool, migrations};
use postboard_server::{build_router, ServerConfig};

struct TestApp {
    router: Router,
    pool: SqlitePool,
}

impl TestApp {
    async fn new() -> Self {
        let pool = create_memory_pool().await.expect("pool");
        migrations::run(&pool).await.expect("migrations");
        let router = build_router(pool.clone(), &ServerConfig::default());
        Self { router, pool }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        match body {
            Some(json) => {
                self.send_raw(method, uri, "application/json", json.to_string())
                    .await
            }
            None => {
                let request = Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap();
                self.dispatch(request).await
            }
        }
    }

    async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        content_type: &str,
        body: String,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap();
        self.dispatch(request).await
    }

    /// Every non-empty response body must be JSON
    async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                panic!(
                    "{status} body is not JSON ({e}): {}",
                    String::from_utf8_lossy(&bytes)
                )
            })
        };
        (status, value)
    }

    async fn create_user(&self, username: &str) -> i64 {
        let (status, body) = self
            .send(
                "POST",
                "/users/",
                Some(json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": "secret",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    async fn create_post(&self, title: &str, user_id: i64) -> i64 {
        let (status, body) = self
            .send(
                "POST",
                "/posts/",
                Some(json!({ "title": title, "content": "body", "user_id": user_id })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn health_endpoint() {
    let app = TestApp::new().await;
    let (status, body) = app.send("GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_user_omits_password() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send(
            "POST",
            "/users/",
            Some(json!({ "username": "alice", "email": "alice@example.com", "password": "hunter2" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body["id"].as_i64().is_some());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn password_is_stored_hashed() {
    let app = TestApp::new().await;
    let id = app.create_user("alice").await;

    let (stored,): (String,) = sqlx::query_as("SELECT password FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_ne!(stored, "secret");
    assert!(stored.starts_with("$argon2"));
}

#[tokio::test]
async fn duplicate_username_or_email_conflicts() {
    let app = TestApp::new().await;
    app.create_user("alice").await;

    let (status, body) = app
        .send(
            "POST",
            "/users/",
            Some(json!({ "username": "alice", "email": "fresh@example.com", "password": "x" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (status, _) = app
        .send(
            "POST",
            "/users/",
            Some(json!({ "username": "fresh", "email": "alice@example.com", "password": "x" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, users) = app.send("GET", "/users/", None).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_signup_is_rejected() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send(
            "POST",
            "/users/",
            Some(json!({ "username": "alice", "email": "not-an-email", "password": "x" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn list_users_returns_everyone() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    let (status, body) = app.send("GET", "/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": alice, "username": "alice", "email": "alice@example.com" },
            { "id": bob, "username": "bob", "email": "bob@example.com" },
        ])
    );
}

#[tokio::test]
async fn update_email() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    let (status, body) = app
        .send("PUT", &format!("/users/{alice}/email/?email=new%40example.com"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User email updated");

    let (_, users) = app.send("GET", "/users/", None).await;
    assert_eq!(users[0]["email"], "new@example.com");
}

#[tokio::test]
async fn update_email_of_missing_user_is_404() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send("PUT", "/users/99/email/?email=a%40b.c", None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "user '99' not found");
}

#[tokio::test]
async fn malformed_id_is_400() {
    let app = TestApp::new().await;
    let (status, body) = app.send("DELETE", "/users/abc/", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn deleting_user_removes_their_posts() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    app.create_post("a1", alice).await;
    app.create_post("a2", alice).await;
    let kept = app.create_post("b1", bob).await;

    let (status, body) = app.send("DELETE", &format!("/users/{alice}/"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User and their posts deleted");

    let (status, posts) = app.send("GET", "/posts/", None).await;
    assert_eq!(status, StatusCode::OK);
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["id"], kept);

    let (status, _) = app.send("DELETE", &format!("/users/{alice}/"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_post_returns_only_id() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    let (status, body) = app
        .send(
            "POST",
            "/posts/",
            Some(json!({ "title": "Hello", "content": "World", "user_id": alice })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.as_object().unwrap().len(), 1);
    assert!(body["id"].as_i64().is_some());
}

#[tokio::test]
async fn create_post_for_missing_user_is_404() {
    let app = TestApp::new().await;
    let (status, _) = app
        .send(
            "POST",
            "/posts/",
            Some(json!({ "title": "Hello", "content": "World", "user_id": 5 })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_posts_embeds_author() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let post = app.create_post("Hello", alice).await;

    let (status, body) = app.send("GET", "/posts/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": post,
            "title": "Hello",
            "content": "body",
            "user": { "id": alice, "username": "alice", "email": "alice@example.com" },
        }])
    );
}

#[tokio::test]
async fn list_user_posts_filters_by_owner() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    app.create_post("a1", alice).await;
    app.create_post("b1", bob).await;

    let (status, body) = app.send("GET", &format!("/users/{bob}/posts/"), None).await;
    assert_eq!(status, StatusCode::OK);
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "b1");
    assert_eq!(posts[0]["user"]["id"], bob);

    let (status, body) = app.send("GET", "/users/777/posts/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn dangling_post_owner_is_a_server_error() {
    let app = TestApp::new().await;
    sqlx::query("PRAGMA foreign_keys = OFF")
        .execute(&app.pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO posts (title, content, user_id) VALUES ('t', 'c', 31)")
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, body) = app.send("GET", "/posts/", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
}

#[tokio::test]
async fn update_post_content() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let post = app.create_post("t", alice).await;

    let (status, body) = app
        .send("PUT", &format!("/posts/{post}/content/?content=rewritten"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post content updated");

    let (_, posts) = app.send("GET", "/posts/", None).await;
    assert_eq!(posts[0]["content"], "rewritten");
}

#[tokio::test]
async fn update_missing_post_content_is_404() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send("PUT", "/posts/12/content/?content=x", None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn delete_post() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let post = app.create_post("t", alice).await;

    let (status, body) = app.send("DELETE", &format!("/posts/{post}/"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post deleted");

    let (status, _) = app.send("DELETE", &format!("/posts/{post}/"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn signup_missing_field_is_json_400() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send("POST", "/users/", Some(json!({ "username": "a" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("email"), "{body}");
}

#[tokio::test]
async fn non_json_post_body_is_json_400() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send_raw("POST", "/posts/", "application/json", "{not json".into())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = app
        .send_raw("POST", "/posts/", "text/plain", "hello".into())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn missing_query_parameters_are_json_400() {
    let app = TestApp::new().await;
    let user_id = app.create_user("alice").await;
    let post_id = app.create_post("first", user_id).await;

    let (status, body) = app
        .send("PUT", &format!("/users/{user_id}/email/"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("email"), "{body}");

    let (status, body) = app
        .send("PUT", &format!("/posts/{post_id}/content/"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}
