use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use validator::Validate;

use crate::app::AppState;
use crate::entities::prelude::*;
use crate::entities::todos;
use crate::http::{Error, FieldError, FromRequest, Json, Request, Response, Result, StatusCode};
use crate::models::{collect_field_errors, CreateTaskInput, UpdateTaskInput};

fn todo_id(req: &Request) -> Result<i32> {
    req.param_as("id")
        .ok_or_else(|| Error::BadRequest("Invalid todo id".into()))
}

/// GET /api/todos — newest first.
pub async fn list(state: AppState, _req: Request) -> Result<Response> {
    let todos = Todos::find()
        .order_by_desc(todos::Column::CreatedAt)
        .order_by_desc(todos::Column::Id)
        .all(&state.db)
        .await?;

    Ok(crate::json!(todos))
}

/// POST /api/todos
pub async fn create(state: AppState, req: Request) -> Result<Response> {
    let Json(input) = Json::<CreateTaskInput>::from_request(&req).await?;
    input
        .validate()
        .map_err(|e| Error::Validation(collect_field_errors(&e)))?;

    let todo = todos::ActiveModel {
        text: Set(input.text.trim().to_string()),
        completed: Set(false),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok(crate::json!(StatusCode::Created, todo))
}

/// PUT /api/todos/:id — partial update: text, completed flag, or both.
pub async fn update(state: AppState, req: Request) -> Result<Response> {
    let id = todo_id(&req)?;
    let Json(input) = Json::<UpdateTaskInput>::from_request(&req).await?;

    let todo = Todos::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::NotFound("Todo not found".into()))?;

    let mut active: todos::ActiveModel = todo.into();

    if let Some(text) = input.text {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(Error::Validation(vec![FieldError::new(
                "text",
                "Text is required",
            )]));
        }
        active.text = Set(text);
    }

    if let Some(completed) = input.completed {
        active.completed = Set(completed);
    }

    let todo = active.update(&state.db).await?;
    Ok(crate::json!(todo))
}

/// DELETE /api/todos/:id
pub async fn remove(state: AppState, req: Request) -> Result<Response> {
    let id = todo_id(&req)?;

    Todos::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::NotFound("Todo not found".into()))?;

    Todos::delete_by_id(id).exec(&state.db).await?;

    Ok(Response::new(StatusCode::NoContent, Vec::new()))
}
