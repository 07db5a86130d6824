use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
    Unknown(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Unknown(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
    Unknown(String),
}

#[derive(Debug, Clone)]
pub struct Uri {
    pub path: String,
    pub query: Option<HashMap<String, String>>,
}

impl Uri {
    pub fn new(path: &str, query: Option<HashMap<String, String>>) -> Self {
        Uri {
            path: String::from(path),
            query,
        }
    }
}

/// A parsed HTTP request. Header names are stored lowercased; route
/// parameters are filled in by the router before dispatch.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
    pub headers: HashMap<String, Vec<String>>,
    pub body: Vec<u8>,
    pub remote_addr: Option<std::net::SocketAddr>,
    pub params: HashMap<String, String>,
}

impl Request {
    pub fn new(
        method: Method,
        uri: Uri,
        version: Version,
        headers: HashMap<String, Vec<String>>,
        body: Vec<u8>,
        remote_addr: Option<std::net::SocketAddr>,
    ) -> Self {
        Request {
            method,
            uri,
            version,
            headers,
            body,
            remote_addr,
            params: HashMap::new(),
        }
    }

    /// Get a route parameter by name.
    pub fn param(&self, name: &str) -> Option<&String> {
        self.params.get(name)
    }

    /// Get a route parameter parsed as a specific type.
    pub fn param_as<T>(&self, name: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(name)?.parse().ok()
    }

    /// Get a header value by lowercased name (first value if repeated).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.first().map(|s| s.as_str())
    }

    /// Get a query parameter from the URI.
    pub fn query(&self, name: &str) -> Option<&String> {
        self.uri.query.as_ref()?.get(name)
    }

    /// Request body as a str slice.
    pub fn body_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }
}
