//! HTTP access to the todo endpoints. `TodoApi` is the seam the model is
//! tested against; `HttpApi` is the real wire implementation.

use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub text: String,
    pub completed: bool,
    pub created_at: String,
}

/// Partial update body for PUT /api/todos/:id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[derive(Debug)]
pub enum ApiError {
    Io(std::io::Error),
    Protocol(String),
    /// Non-success status with the server's message body.
    Status(u16, String),
    Json(serde_json::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::Io(err) => write!(f, "io error: {}", err),
            ApiError::Protocol(msg) => write!(f, "protocol error: {}", msg),
            ApiError::Status(code, msg) => write!(f, "server returned {}: {}", code, msg),
            ApiError::Json(err) => write!(f, "invalid response body: {}", err),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Io(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Json(err)
    }
}

#[async_trait::async_trait]
pub trait TodoApi {
    async fn fetch_all(&self) -> Result<Vec<Task>, ApiError>;
    async fn create(&self, text: &str) -> Result<Task, ApiError>;
    async fn update(&self, id: i32, patch: TaskPatch) -> Result<Task, ApiError>;
    async fn delete(&self, id: i32) -> Result<(), ApiError>;
}

pub struct HttpApi {
    addr: String,
}

impl HttpApi {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    /// One request per connection; the server closes after responding, so
    /// reading to EOF yields the full response.
    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<(u16, Vec<u8>), ApiError> {
        let mut stream = TcpStream::connect(&self.addr).await?;

        let mut head = format!(
            "{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n",
            method, path, self.addr
        );
        if let Some(body) = &body {
            head.push_str("Content-Type: application/json\r\n");
            head.push_str(&format!("Content-Length: {}\r\n", body.len()));
        }
        head.push_str("\r\n");

        stream.write_all(head.as_bytes()).await?;
        if let Some(body) = &body {
            stream.write_all(body).await?;
        }

        let mut buf = BytesMut::with_capacity(8192);
        while stream.read_buf(&mut buf).await? != 0 {}

        let mut headers = [httparse::EMPTY_HEADER; 64];
        let mut response = httparse::Response::new(&mut headers);

        match response.parse(&buf) {
            Ok(httparse::Status::Complete(header_len)) => {
                let code = response
                    .code
                    .ok_or_else(|| ApiError::Protocol("missing status code".into()))?;
                Ok((code, buf[header_len..].to_vec()))
            }
            Ok(httparse::Status::Partial) => {
                Err(ApiError::Protocol("truncated response".into()))
            }
            Err(e) => Err(ApiError::Protocol(e.to_string())),
        }
    }

    fn check(expected: u16, code: u16, body: &[u8]) -> Result<(), ApiError> {
        if code == expected {
            return Ok(());
        }
        // Prefer the server's {"message"} if the body has one.
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| String::from_utf8_lossy(body).to_string());
        Err(ApiError::Status(code, message))
    }
}

#[async_trait::async_trait]
impl TodoApi for HttpApi {
    async fn fetch_all(&self) -> Result<Vec<Task>, ApiError> {
        let (code, body) = self.request("GET", "/api/todos", None).await?;
        Self::check(200, code, &body)?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn create(&self, text: &str) -> Result<Task, ApiError> {
        let payload = serde_json::to_vec(&serde_json::json!({ "text": text }))?;
        let (code, body) = self.request("POST", "/api/todos", Some(payload)).await?;
        Self::check(201, code, &body)?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn update(&self, id: i32, patch: TaskPatch) -> Result<Task, ApiError> {
        let payload = serde_json::to_vec(&patch)?;
        let path = format!("/api/todos/{}", id);
        let (code, body) = self.request("PUT", &path, Some(payload)).await?;
        Self::check(200, code, &body)?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn delete(&self, id: i32) -> Result<(), ApiError> {
        let path = format!("/api/todos/{}", id);
        let (code, body) = self.request("DELETE", &path, None).await?;
        Self::check(204, code, &body)
    }
}
