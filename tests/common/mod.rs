#![allow(dead_code)]

use scrawl::app::{build_server, AppState};
use scrawl::config::AuthConfig;
use scrawl::db;
use scrawl::http::test::TestClient;
use sea_orm::DatabaseConnection;

pub async fn test_state() -> AppState {
    let db = db::connect("sqlite::memory:").await.expect("connect");
    db::init_schema(&db).await.expect("schema");
    AppState {
        db,
        auth: AuthConfig::default(),
    }
}

pub async fn client() -> TestClient {
    TestClient::new(build_server(test_state().await))
}

/// Client plus a handle on the same database, for tests that seed rows
/// directly.
pub async fn client_with_db() -> (TestClient, DatabaseConnection) {
    let state = test_state().await;
    let db = state.db.clone();
    (TestClient::new(build_server(state)), db)
}

/// Register a user through the API; returns (user id, bearer token).
pub async fn register(client: &TestClient, username: &str) -> (i32, String) {
    let res = client
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "hunter2-but-longer",
        }))
        .send()
        .await;
    res.assert_created();

    let body: serde_json::Value = res.json();
    let id = body["user"]["id"].as_i64().expect("user id") as i32;
    let token = body["token"].as_str().expect("token").to_string();
    (id, token)
}

/// Create a post through the API; returns its id.
pub async fn create_post(client: &TestClient, token: &str, title: &str, content: &str) -> i32 {
    let res = client
        .post("/api/posts")
        .bearer(token)
        .json(&serde_json::json!({ "title": title, "content": content }))
        .send()
        .await;
    res.assert_created();

    let body: serde_json::Value = res.json();
    body["id"].as_i64().expect("post id") as i32
}
