mod common;

use common::client;

#[tokio::test]
async fn create_trims_text_and_lists() {
    let client = client().await;

    let res = client
        .post("/api/todos")
        .json(&serde_json::json!({ "text": "  buy milk  " }))
        .send()
        .await;
    res.assert_created();

    let todo: serde_json::Value = res.json();
    assert_eq!(todo["text"], "buy milk");
    assert_eq!(todo["completed"], false);

    let res = client.get("/api/todos").send().await;
    res.assert_ok();
    let todos: Vec<serde_json::Value> = res.json();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["text"], "buy milk");
}

#[tokio::test]
async fn blank_text_is_a_validation_error() {
    let client = client().await;

    let res = client
        .post("/api/todos")
        .json(&serde_json::json!({ "text": "   " }))
        .send()
        .await;
    res.assert_bad_request();

    let body: serde_json::Value = res.json();
    assert_eq!(body["errors"][0]["field"], "text");
    assert_eq!(body["errors"][0]["message"], "Text is required");

    assert!(client.get("/api/todos").send().await.json::<Vec<serde_json::Value>>().is_empty());
}

#[tokio::test]
async fn toggle_twice_returns_to_original() {
    let client = client().await;

    let res = client
        .post("/api/todos")
        .json(&serde_json::json!({ "text": "task" }))
        .send()
        .await;
    let id = res.json::<serde_json::Value>()["id"].as_i64().unwrap();

    let res = client
        .put(&format!("/api/todos/{}", id))
        .json(&serde_json::json!({ "completed": true }))
        .send()
        .await;
    res.assert_ok();
    assert_eq!(res.json::<serde_json::Value>()["completed"], true);

    let res = client
        .put(&format!("/api/todos/{}", id))
        .json(&serde_json::json!({ "completed": false }))
        .send()
        .await;
    res.assert_ok();
    assert_eq!(res.json::<serde_json::Value>()["completed"], false);
}

#[tokio::test]
async fn text_update_preserves_completed_flag() {
    let client = client().await;

    let res = client
        .post("/api/todos")
        .json(&serde_json::json!({ "text": "old text" }))
        .send()
        .await;
    let id = res.json::<serde_json::Value>()["id"].as_i64().unwrap();

    client
        .put(&format!("/api/todos/{}", id))
        .json(&serde_json::json!({ "completed": true }))
        .send()
        .await
        .assert_ok();

    let res = client
        .put(&format!("/api/todos/{}", id))
        .json(&serde_json::json!({ "text": "new text" }))
        .send()
        .await;
    res.assert_ok();

    let todo: serde_json::Value = res.json();
    assert_eq!(todo["text"], "new text");
    assert_eq!(todo["completed"], true);
}

#[tokio::test]
async fn blank_text_update_is_rejected() {
    let client = client().await;

    let res = client
        .post("/api/todos")
        .json(&serde_json::json!({ "text": "keep" }))
        .send()
        .await;
    let id = res.json::<serde_json::Value>()["id"].as_i64().unwrap();

    client
        .put(&format!("/api/todos/{}", id))
        .json(&serde_json::json!({ "text": " " }))
        .send()
        .await
        .assert_bad_request();

    let todos: Vec<serde_json::Value> = client.get("/api/todos").send().await.json();
    assert_eq!(todos[0]["text"], "keep");
}

#[tokio::test]
async fn delete_removes_the_todo() {
    let client = client().await;

    let res = client
        .post("/api/todos")
        .json(&serde_json::json!({ "text": "ephemeral" }))
        .send()
        .await;
    let id = res.json::<serde_json::Value>()["id"].as_i64().unwrap();

    client
        .delete(&format!("/api/todos/{}", id))
        .send()
        .await
        .assert_no_content();

    client
        .delete(&format!("/api/todos/{}", id))
        .send()
        .await
        .assert_not_found();

    assert!(client.get("/api/todos").send().await.json::<Vec<serde_json::Value>>().is_empty());
}

#[tokio::test]
async fn missing_todo_update_is_not_found() {
    let client = client().await;

    client
        .put("/api/todos/12345")
        .json(&serde_json::json!({ "completed": true }))
        .send()
        .await
        .assert_not_found();
}

#[tokio::test]
async fn list_orders_newest_first() {
    let client = client().await;

    for text in ["one", "two", "three"] {
        client
            .post("/api/todos")
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .assert_created();
    }

    let todos: Vec<serde_json::Value> = client.get("/api/todos").send().await.json();
    let texts: Vec<&str> = todos.iter().map(|t| t["text"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["three", "two", "one"]);
}
