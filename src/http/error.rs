use serde::Serialize;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// One field-level validation failure, serialized into the
/// `{"errors": [...]}` response body.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    /// Malformed request (bad JSON, unparsable path parameter).
    BadRequest(String),
    /// Field-level validation failures.
    Validation(Vec<FieldError>),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Database(sea_orm::DbErr),
    Io(std::io::Error),
    Internal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Error::Validation(errors) => write!(f, "Validation failed ({} errors)", errors.len()),
            Error::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Error::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::Database(err) => write!(f, "Database error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::BadRequest(format!("Invalid JSON: {}", err))
    }
}

impl From<sea_orm::DbErr> for Error {
    fn from(err: sea_orm::DbErr) -> Self {
        Error::Database(err)
    }
}

impl Error {
    /// Convert the error to its HTTP response. Persistence and internal
    /// errors are logged server-side and reach the client as a generic
    /// message only.
    pub fn into_response(self) -> crate::http::Response {
        use crate::http::{Response, StatusCode};

        let (status, message) = match self {
            Error::Validation(errors) => {
                let body = serde_json::json!({ "errors": errors });
                return Response::new(StatusCode::BadRequest, Vec::new()).json(&body);
            }
            Error::BadRequest(msg) => (StatusCode::BadRequest, msg),
            Error::Unauthorized(msg) => (StatusCode::Unauthorized, msg),
            Error::Forbidden(msg) => (StatusCode::Forbidden, msg),
            Error::NotFound(msg) => (StatusCode::NotFound, msg),
            Error::Database(err) => {
                crate::error!("[http] database error: {}", err);
                (StatusCode::InternalServerError, "Server error".to_string())
            }
            Error::Io(err) => {
                crate::error!("[http] io error: {}", err);
                (StatusCode::InternalServerError, "Server error".to_string())
            }
            Error::Internal(msg) => {
                crate::error!("[http] internal error: {}", msg);
                (StatusCode::InternalServerError, "Server error".to_string())
            }
        };

        let body = serde_json::json!({ "message": message });
        Response::new(status, Vec::new()).json(&body)
    }
}
