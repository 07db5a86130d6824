mod common;

use common::{client, client_with_db, create_post, register};
use scrawl::entities::prelude::*;
use scrawl::entities::comments;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

#[tokio::test]
async fn create_requires_authentication() {
    let client = client().await;

    client
        .post("/api/posts")
        .json(&serde_json::json!({ "title": "t", "content": "c" }))
        .send()
        .await
        .assert_unauthorized();
}

#[tokio::test]
async fn create_and_get_round_trip() {
    let client = client().await;
    let (user_id, token) = register(&client, "ada").await;

    let res = client
        .post("/api/posts")
        .bearer(&token)
        .json(&serde_json::json!({ "title": "First post", "content": "Hello" }))
        .send()
        .await;
    res.assert_created();

    let created: serde_json::Value = res.json();
    assert_eq!(created["title"], "First post");
    assert_eq!(created["author"]["username"], "ada");
    assert_eq!(created["author"]["id"], user_id);
    assert!(created["author"].get("password_hash").is_none());

    let id = created["id"].as_i64().unwrap();
    let res = client.get(&format!("/api/posts/{}", id)).send().await;
    res.assert_ok();
    let fetched: serde_json::Value = res.json();
    assert_eq!(fetched["content"], "Hello");
    assert_eq!(fetched["author"]["email"], "ada@example.com");
}

#[tokio::test]
async fn list_orders_newest_first() {
    let client = client().await;
    let (_, token) = register(&client, "ada").await;

    for title in ["one", "two", "three"] {
        create_post(&client, &token, title, "body").await;
    }

    let res = client.get("/api/posts").send().await;
    res.assert_ok();
    let posts: Vec<serde_json::Value> = res.json();
    let titles: Vec<&str> = posts.iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["three", "two", "one"]);
}

#[tokio::test]
async fn title_length_bounds() {
    let client = client().await;
    let (_, token) = register(&client, "ada").await;

    client
        .post("/api/posts")
        .bearer(&token)
        .json(&serde_json::json!({ "title": "a".repeat(200), "content": "c" }))
        .send()
        .await
        .assert_created();

    let res = client
        .post("/api/posts")
        .bearer(&token)
        .json(&serde_json::json!({ "title": "a".repeat(201), "content": "c" }))
        .send()
        .await;
    res.assert_bad_request();

    let body: serde_json::Value = res.json();
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors[0]["field"], "title");
    assert_eq!(errors[0]["message"], "Title cannot exceed 200 characters");
}

#[tokio::test]
async fn validation_reports_each_blank_field() {
    let client = client().await;
    let (_, token) = register(&client, "ada").await;

    let res = client
        .post("/api/posts")
        .bearer(&token)
        .json(&serde_json::json!({ "title": "   ", "content": "" }))
        .send()
        .await;
    res.assert_bad_request();

    let body: serde_json::Value = res.json();
    let mut fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    fields.sort();
    assert_eq!(fields, vec!["content", "title"]);
}

#[tokio::test]
async fn non_author_cannot_mutate() {
    let client = client().await;
    let (_, author_token) = register(&client, "ada").await;
    let (_, other_token) = register(&client, "mallory").await;

    let id = create_post(&client, &author_token, "Mine", "original").await;

    client
        .put(&format!("/api/posts/{}", id))
        .bearer(&other_token)
        .json(&serde_json::json!({ "title": "Stolen", "content": "changed" }))
        .send()
        .await
        .assert_forbidden();

    client
        .delete(&format!("/api/posts/{}", id))
        .bearer(&other_token)
        .send()
        .await
        .assert_forbidden();

    // Post is unchanged and still present.
    let res = client.get(&format!("/api/posts/{}", id)).send().await;
    res.assert_ok();
    let post: serde_json::Value = res.json();
    assert_eq!(post["title"], "Mine");
    assert_eq!(post["content"], "original");
}

#[tokio::test]
async fn delete_cascades_comments() {
    let (client, db) = client_with_db().await;
    let (user_id, token) = register(&client, "ada").await;

    let doomed = create_post(&client, &token, "Doomed", "bye").await;
    let kept = create_post(&client, &token, "Kept", "stay").await;

    for (post_id, text) in [(doomed, "first"), (doomed, "second"), (kept, "other")] {
        comments::ActiveModel {
            post_id: Set(post_id),
            user_id: Set(user_id),
            content: Set(text.to_string()),
            created_at: Set("2026-01-01T00:00:00Z".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
    }

    let res = client
        .delete(&format!("/api/posts/{}", doomed))
        .bearer(&token)
        .send()
        .await;
    res.assert_ok();
    let body: serde_json::Value = res.json();
    assert_eq!(
        body["message"],
        "Post and associated comments deleted successfully"
    );

    let orphans = Comments::find()
        .filter(comments::Column::PostId.eq(doomed))
        .all(&db)
        .await
        .unwrap();
    assert!(orphans.is_empty());

    let survivors = Comments::find()
        .filter(comments::Column::PostId.eq(kept))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(survivors.len(), 1);

    client
        .get(&format!("/api/posts/{}", doomed))
        .send()
        .await
        .assert_not_found();
    client.get(&format!("/api/posts/{}", kept)).send().await.assert_ok();
}

#[tokio::test]
async fn missing_post_is_not_found() {
    let client = client().await;
    let (_, token) = register(&client, "ada").await;

    client.get("/api/posts/999").send().await.assert_not_found();

    client
        .put("/api/posts/999")
        .bearer(&token)
        .json(&serde_json::json!({ "title": "t", "content": "c" }))
        .send()
        .await
        .assert_not_found();

    client
        .delete("/api/posts/999")
        .bearer(&token)
        .send()
        .await
        .assert_not_found();
}

#[tokio::test]
async fn posts_by_user_filters_to_that_author() {
    let client = client().await;
    let (ada_id, ada_token) = register(&client, "ada").await;
    let (_, grace_token) = register(&client, "grace").await;

    create_post(&client, &ada_token, "Ada one", "x").await;
    create_post(&client, &grace_token, "Grace one", "x").await;
    create_post(&client, &ada_token, "Ada two", "x").await;

    let res = client.get(&format!("/api/posts/user/{}", ada_id)).send().await;
    res.assert_ok();
    let posts: Vec<serde_json::Value> = res.json();
    let titles: Vec<&str> = posts.iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Ada two", "Ada one"]);
    assert!(posts.iter().all(|p| p["author"]["username"] == "ada"));
}

#[tokio::test]
async fn update_rewrites_content_and_bumps_timestamp() {
    let client = client().await;
    let (_, token) = register(&client, "ada").await;
    let id = create_post(&client, &token, "Before", "old").await;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let res = client
        .put(&format!("/api/posts/{}", id))
        .bearer(&token)
        .json(&serde_json::json!({ "title": "After", "content": "new" }))
        .send()
        .await;
    res.assert_ok();

    let post: serde_json::Value = res.json();
    assert_eq!(post["title"], "After");
    assert_eq!(post["content"], "new");
    assert_eq!(post["author"]["username"], "ada");
    assert!(post["updated_at"].as_str().unwrap() > post["created_at"].as_str().unwrap());
}
