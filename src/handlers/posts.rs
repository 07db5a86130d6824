use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use validator::Validate;

use crate::app::AppState;
use crate::auth::authenticate;
use crate::entities::prelude::*;
use crate::entities::{comments, posts};
use crate::http::{Error, FromRequest, Json, Request, Response, Result, StatusCode};
use crate::models::{collect_field_errors, PostInput, PostWithAuthor};

fn post_id(req: &Request) -> Result<i32> {
    req.param_as("id")
        .ok_or_else(|| Error::BadRequest("Invalid post id".into()))
}

async fn with_author(state: &AppState, post: posts::Model) -> Result<PostWithAuthor> {
    let author = Users::find_by_id(post.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::Internal(format!("post {} has no author row", post.id)))?;
    Ok(PostWithAuthor::project(post, author))
}

fn validated(input: PostInput) -> Result<PostInput> {
    let input = input.trimmed();
    input
        .validate()
        .map_err(|e| Error::Validation(collect_field_errors(&e)))?;
    Ok(input)
}

/// GET /api/posts — all posts, author populated, newest first.
pub async fn list(state: AppState, _req: Request) -> Result<Response> {
    let rows = Posts::find()
        .find_also_related(Users)
        .order_by_desc(posts::Column::CreatedAt)
        .order_by_desc(posts::Column::Id)
        .all(&state.db)
        .await?;

    let posts: Vec<PostWithAuthor> = rows
        .into_iter()
        .filter_map(|(post, author)| author.map(|a| PostWithAuthor::project(post, a)))
        .collect();

    Ok(crate::json!(posts))
}

/// GET /api/posts/:id
pub async fn get(state: AppState, req: Request) -> Result<Response> {
    let id = post_id(&req)?;

    let post = Posts::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::NotFound("Post not found".into()))?;

    let post = with_author(&state, post).await?;
    Ok(crate::json!(post))
}

/// POST /api/posts — authenticated; author comes from the token, never
/// from the body.
pub async fn create(state: AppState, req: Request) -> Result<Response> {
    let claims = authenticate(&req, &state.auth)?;
    let Json(input) = Json::<PostInput>::from_request(&req).await?;
    let input = validated(input)?;

    let now = chrono::Utc::now().to_rfc3339();
    let post = posts::ActiveModel {
        user_id: Set(claims.sub),
        title: Set(input.title),
        content: Set(input.content),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    let post = with_author(&state, post).await?;
    Ok(crate::json!(StatusCode::Created, post))
}

/// PUT /api/posts/:id — author only; bumps the update timestamp.
pub async fn update(state: AppState, req: Request) -> Result<Response> {
    let claims = authenticate(&req, &state.auth)?;
    let id = post_id(&req)?;
    let Json(input) = Json::<PostInput>::from_request(&req).await?;
    let input = validated(input)?;

    let post = Posts::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::NotFound("Post not found".into()))?;

    if post.user_id != claims.sub {
        return Err(Error::Forbidden("Not authorized to update this post".into()));
    }

    let mut active: posts::ActiveModel = post.into();
    active.title = Set(input.title);
    active.content = Set(input.content);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());
    let post = active.update(&state.db).await?;

    let post = with_author(&state, post).await?;
    Ok(crate::json!(post))
}

/// DELETE /api/posts/:id — author only. Comments go first so a failure
/// in between never leaves orphaned comments.
pub async fn remove(state: AppState, req: Request) -> Result<Response> {
    let claims = authenticate(&req, &state.auth)?;
    let id = post_id(&req)?;

    let post = Posts::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::NotFound("Post not found".into()))?;

    if post.user_id != claims.sub {
        return Err(Error::Forbidden("Not authorized to delete this post".into()));
    }

    Comments::delete_many()
        .filter(comments::Column::PostId.eq(id))
        .exec(&state.db)
        .await?;

    Posts::delete_by_id(id).exec(&state.db).await?;

    Ok(crate::message!(
        "Post and associated comments deleted successfully"
    ))
}

/// GET /api/posts/user/:userId — one author's posts, same projection and
/// sort as the full listing.
pub async fn list_by_user(state: AppState, req: Request) -> Result<Response> {
    let user_id: i32 = req
        .param_as("userId")
        .ok_or_else(|| Error::BadRequest("Invalid user id".into()))?;

    let rows = Posts::find()
        .filter(posts::Column::UserId.eq(user_id))
        .find_also_related(Users)
        .order_by_desc(posts::Column::CreatedAt)
        .order_by_desc(posts::Column::Id)
        .all(&state.db)
        .await?;

    let posts: Vec<PostWithAuthor> = rows
        .into_iter()
        .filter_map(|(post, author)| author.map(|a| PostWithAuthor::project(post, a)))
        .collect();

    Ok(crate::json!(posts))
}
