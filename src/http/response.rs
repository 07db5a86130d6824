use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    Created,
    NoContent,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    InternalServerError,
    Custom(u16, String),
}

impl StatusCode {
    pub fn as_str(&self) -> String {
        match self {
            StatusCode::Ok => "200 OK".to_string(),
            StatusCode::Created => "201 Created".to_string(),
            StatusCode::NoContent => "204 No Content".to_string(),
            StatusCode::BadRequest => "400 Bad Request".to_string(),
            StatusCode::Unauthorized => "401 Unauthorized".to_string(),
            StatusCode::Forbidden => "403 Forbidden".to_string(),
            StatusCode::NotFound => "404 Not Found".to_string(),
            StatusCode::InternalServerError => "500 Internal Server Error".to_string(),
            StatusCode::Custom(code, text) => format!("{code} {text}"),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NoContent => 204,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::Custom(code, _) => *code,
        }
    }
}

#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        let mut headers = HashMap::new();
        headers.insert("Connection".into(), "close".into());

        Self {
            status,
            headers,
            body,
        }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn set_body(&mut self, body: Vec<u8>) -> &mut Self {
        self.body = body;
        self
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// Set a plain text body.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.body = text.into().into_bytes();
        self.headers.insert(
            "Content-Type".to_string(),
            "text/plain; charset=utf-8".to_string(),
        );
        self
    }

    /// Set a JSON body. Serialization failure degrades to a 500 with a
    /// generic message rather than panicking.
    pub fn json(mut self, data: impl serde::Serialize) -> Self {
        match serde_json::to_vec(&data) {
            Ok(body) => {
                self.body = body;
            }
            Err(_) => {
                self.status = StatusCode::InternalServerError;
                self.body = b"{\"message\":\"Server error\"}".to_vec();
            }
        }
        self.headers.insert(
            "Content-Type".to_string(),
            "application/json".to_string(),
        );
        self
    }

    /// Serialize status line, headers and body to wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {}\r\n", self.status.as_str());
        head.push_str(&format!("Content-Length: {}\r\n", self.body.len()));

        for (k, v) in &self.headers {
            if k.eq_ignore_ascii_case("content-length") {
                continue;
            }
            head.push_str(&format!("{k}: {v}\r\n"));
        }

        head.push_str("\r\n");
        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

impl Default for Response {
    fn default() -> Self {
        Response::new(StatusCode::Ok, Vec::new())
    }
}
