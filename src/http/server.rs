use bytes::BytesMut;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::http::{Flow, Method, Middleware, Request, Response, Router, StatusCode, Uri, Version};

const MAX_REQUEST_BYTES: usize = 64 * 1024;

pub struct Server {
    pub(crate) router: Router,
    pub(crate) middlewares: Vec<Middleware>,
}

impl Server {
    pub fn new() -> Self {
        Server {
            router: Router::new(),
            middlewares: Vec::new(),
        }
    }

    pub fn route<H>(mut self, method: &str, path: &str, handler: H) -> Self
    where
        H: crate::http::AsyncHandler + 'static,
    {
        self.router.add_route(method, path, Box::new(handler));
        self
    }

    pub fn get<H>(self, path: &str, handler: H) -> Self
    where
        H: crate::http::AsyncHandler + 'static,
    {
        self.route("GET", path, handler)
    }

    pub fn post<H>(self, path: &str, handler: H) -> Self
    where
        H: crate::http::AsyncHandler + 'static,
    {
        self.route("POST", path, handler)
    }

    pub fn put<H>(self, path: &str, handler: H) -> Self
    where
        H: crate::http::AsyncHandler + 'static,
    {
        self.route("PUT", path, handler)
    }

    pub fn delete<H>(self, path: &str, handler: H) -> Self
    where
        H: crate::http::AsyncHandler + 'static,
    {
        self.route("DELETE", path, handler)
    }

    pub fn middleware(mut self, mw: Middleware) -> Self {
        self.middlewares.push(mw);
        self
    }

    pub async fn listen(self, addr: &str) -> std::io::Result<()> {
        let router = Arc::new(self.router);
        let middlewares = Arc::new(self.middlewares);

        let listener = TcpListener::bind(addr).await?;
        crate::log!("[server] listening on {}", addr);

        loop {
            let (socket, remote_addr) = listener.accept().await?;
            let _ = socket.set_nodelay(true);

            let router = Arc::clone(&router);
            let middlewares = Arc::clone(&middlewares);

            tokio::spawn(async move {
                if let Err(e) = handle_connection(socket, router, middlewares, remote_addr).await {
                    crate::error!("[server] connection error: {}", e);
                }
            });
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a request through the middleware chain and the router. Shared by
/// the live server and the in-process test client.
pub(crate) async fn dispatch(
    router: &Router,
    middlewares: &[Middleware],
    mut request: Request,
) -> Response {
    let mut response = Response::default();

    for mw in middlewares {
        match mw(request, response) {
            Flow::Stop(final_res) => return final_res,
            Flow::Next(r, s) => {
                request = r;
                response = s;
            }
        }
    }

    match router.find(&request.method, &request.uri.path) {
        Some((handler, params)) => {
            request.params = params;
            handler.call(request, response).await
        }
        None => crate::message!(StatusCode::NotFound, "Not found"),
    }
}

async fn handle_connection(
    mut socket: TcpStream,
    router: Arc<Router>,
    middlewares: Arc<Vec<Middleware>>,
    remote_addr: std::net::SocketAddr,
) -> std::io::Result<()> {
    let request = match read_request(&mut socket, remote_addr).await? {
        Some(request) => request,
        None => return Ok(()), // peer closed before sending a request
    };

    let method = request.method.as_str().to_string();
    let path = request.uri.path.clone();

    let response = dispatch(&router, &middlewares, request).await;
    crate::debug!("{} {} -> {}", method, path, response.status.code());

    socket.write_all(&response.to_bytes()).await?;
    socket.shutdown().await
}

/// Read and parse one request: headers first, then exactly Content-Length
/// body bytes. One request per connection; responses carry
/// `Connection: close`.
async fn read_request(
    socket: &mut TcpStream,
    remote_addr: std::net::SocketAddr,
) -> std::io::Result<Option<Request>> {
    let mut buf = BytesMut::with_capacity(8192);

    let header_end = loop {
        if buf.len() > MAX_REQUEST_BYTES {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "request too large",
            ));
        }

        if socket.read_buf(&mut buf).await? == 0 {
            if buf.is_empty() {
                return Ok(None);
            }
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection closed mid-request",
            ));
        }

        if let Some(end) = find_header_end(&buf) {
            break end;
        }
    };

    let mut headers = [httparse::EMPTY_HEADER; 64];
    let mut parsed = httparse::Request::new(&mut headers);

    match parsed.parse(&buf[..header_end]) {
        Ok(httparse::Status::Complete(_)) => {}
        _ => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "invalid HTTP request",
            ));
        }
    }

    let method = parse_method(parsed.method.unwrap_or("GET"));
    let (path, query) = parse_path_and_query(parsed.path.unwrap_or("/"));
    let version = match parsed.version {
        Some(0) => Version::Http10,
        Some(1) => Version::Http11,
        v => Version::Unknown(format!("HTTP/{:?}", v)),
    };
    let uri = Uri::new(path, query);

    let mut header_map: HashMap<String, Vec<String>> = HashMap::with_capacity(parsed.headers.len());
    let mut content_length = 0usize;

    for header in parsed.headers.iter() {
        let name = header.name.to_ascii_lowercase();
        let value = std::str::from_utf8(header.value).unwrap_or("").to_string();

        if name == "content-length" {
            content_length = value.parse().unwrap_or(0);
        }

        header_map.entry(name).or_default().push(value);
    }

    if content_length > MAX_REQUEST_BYTES {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "request body too large",
        ));
    }

    while buf.len() < header_end + content_length {
        if socket.read_buf(&mut buf).await? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection closed mid-body",
            ));
        }
    }

    let body = buf[header_end..header_end + content_length].to_vec();

    Ok(Some(Request::new(
        method,
        uri,
        version,
        header_map,
        body,
        Some(remote_addr),
    )))
}

#[inline]
fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

#[inline]
fn parse_method(method: &str) -> Method {
    match method {
        "GET" => Method::GET,
        "POST" => Method::POST,
        "PUT" => Method::PUT,
        "DELETE" => Method::DELETE,
        "HEAD" => Method::HEAD,
        "OPTIONS" => Method::OPTIONS,
        "PATCH" => Method::PATCH,
        _ => Method::Unknown(method.to_string()),
    }
}

#[inline]
fn parse_path_and_query(path: &str) -> (&str, Option<HashMap<String, String>>) {
    let Some(pos) = path.find('?') else {
        return (path, None);
    };

    let (path_only, query_str) = path.split_at(pos);
    let query_str = &query_str[1..];

    if query_str.is_empty() {
        return (path_only, None);
    }

    let mut query = HashMap::new();
    for pair in query_str.split('&') {
        match pair.find('=') {
            Some(eq) => {
                let (key, value) = pair.split_at(eq);
                query.insert(key.to_string(), value[1..].to_string());
            }
            None => {
                query.insert(pair.to_string(), String::new());
            }
        }
    }
    (path_only, Some(query))
}
