use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::{posts, users};
use crate::http::FieldError;

/// Public projection of a user: the only fields exposed on API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
}

impl From<users::Model> for UserPublic {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            bio: user.bio,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostWithAuthor {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub author: UserPublic,
}

impl PostWithAuthor {
    pub fn project(post: posts::Model, author: users::Model) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author: author.into(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PostInput {
    #[validate(custom = "validate_title")]
    pub title: String,
    #[validate(custom = "validate_content")]
    pub content: String,
}

impl PostInput {
    /// Trim both fields before validation, matching how the inputs are
    /// stored.
    pub fn trimmed(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.content = self.content.trim().to_string();
        self
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(field_violation("required", "Title is required"));
    }
    if title.chars().count() > 200 {
        return Err(field_violation(
            "max_length",
            "Title cannot exceed 200 characters",
        ));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(field_violation("required", "Content is required"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskInput {
    #[validate(custom = "validate_task_text")]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskInput {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

fn validate_task_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(field_violation("required", "Text is required"));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserPublic,
}

fn field_violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(std::borrow::Cow::Borrowed(message));
    err
}

/// Flatten validator output into the `{"errors": [...]}` wire shape.
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    for (field, violations) in errors.field_errors() {
        for violation in violations {
            let message = violation
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| violation.code.to_string());
            out.push(FieldError::new(field.to_string(), message));
        }
    }
    out
}
