use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::app::AppState;
use crate::auth::{authenticate, create_token};
use crate::entities::prelude::*;
use crate::entities::users;
use crate::http::{Error, FieldError, FromRequest, Json, Request, Response, Result, StatusCode};
use crate::models::{AuthResponse, LoginInput, RegisterInput, UserPublic};

/// POST /api/auth/register
pub async fn register(state: AppState, req: Request) -> Result<Response> {
    let Json(input) = Json::<RegisterInput>::from_request(&req).await?;

    let mut errors = Vec::new();
    if input.username.trim().is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    }
    if input.email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    }
    if input.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }
    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    let username = input.username.trim().to_string();

    let existing = Users::find()
        .filter(users::Column::Username.eq(&username))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(Error::BadRequest("Username already exists".into()));
    }

    let password_hash = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)
        .map_err(|e| Error::Internal(format!("password hash failed: {}", e)))?;

    let user = users::ActiveModel {
        username: Set(username),
        email: Set(input.email.trim().to_string()),
        password_hash: Set(password_hash),
        bio: Set(input.bio),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    let token = create_token(user.id, &user.username, &state.auth)
        .map_err(|e| Error::Internal(format!("token creation failed: {}", e)))?;

    Ok(crate::json!(
        StatusCode::Created,
        AuthResponse {
            token,
            user: user.into(),
        }
    ))
}

/// POST /api/auth/login
pub async fn login(state: AppState, req: Request) -> Result<Response> {
    let Json(input) = Json::<LoginInput>::from_request(&req).await?;

    let user = Users::find()
        .filter(users::Column::Username.eq(&input.username))
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid credentials".into()))?;

    let valid = bcrypt::verify(&input.password, &user.password_hash).unwrap_or(false);
    if !valid {
        return Err(Error::Unauthorized("Invalid credentials".into()));
    }

    let token = create_token(user.id, &user.username, &state.auth)
        .map_err(|e| Error::Internal(format!("token creation failed: {}", e)))?;

    Ok(crate::json!(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/auth/me — public projection of the authenticated user.
pub async fn me(state: AppState, req: Request) -> Result<Response> {
    let claims = authenticate(&req, &state.auth)?;

    let user = Users::find_by_id(claims.sub)
        .one(&state.db)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;

    Ok(crate::json!(UserPublic::from(user)))
}
