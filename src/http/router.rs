use std::collections::HashMap;
use std::sync::Arc;

use crate::http::{AsyncHandler, Method};

type HandlerBox = Arc<dyn AsyncHandler>;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Param(String),
}

struct Route {
    method: String,
    segments: Vec<Segment>,
    handler: HandlerBox,
}

/// Method + path router. Paths are matched segment-wise; `:name` segments
/// capture the value as a parameter. When several routes match, the one
/// with the fewest parameter segments wins, so `/posts/user/:id` beats
/// `/posts/:id` where both apply.
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Router { routes: Vec::new() }
    }

    pub fn add_route(&mut self, method: &str, path: &str, handler: Box<dyn AsyncHandler>) {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();

        self.routes.push(Route {
            method: method.to_uppercase(),
            segments,
            handler: Arc::from(handler),
        });
    }

    pub fn find(&self, method: &Method, path: &str) -> Option<(HandlerBox, HashMap<String, String>)> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let method = method.as_str();

        let mut best: Option<(&Route, HashMap<String, String>, usize)> = None;

        for route in &self.routes {
            if route.method != method || route.segments.len() != parts.len() {
                continue;
            }

            let mut params = HashMap::new();
            let mut param_count = 0;
            let mut matched = true;

            for (segment, part) in route.segments.iter().zip(&parts) {
                match segment {
                    Segment::Literal(lit) => {
                        if lit != part {
                            matched = false;
                            break;
                        }
                    }
                    Segment::Param(name) => {
                        params.insert(name.clone(), (*part).to_string());
                        param_count += 1;
                    }
                }
            }

            if matched && best.as_ref().map_or(true, |(_, _, n)| param_count < *n) {
                best = Some((route, params, param_count));
            }
        }

        best.map(|(route, params, _)| (Arc::clone(&route.handler), params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Request, Response};

    fn router_with(routes: &[(&str, &str)]) -> Router {
        let mut router = Router::new();
        for (method, path) in routes {
            router.add_route(method, path, Box::new(ok_handler));
        }
        router
    }

    async fn ok_handler(_req: Request, res: Response) -> Response {
        res
    }

    #[test]
    fn matches_literal_path() {
        let router = router_with(&[("GET", "/api/todos")]);
        assert!(router.find(&Method::GET, "/api/todos").is_some());
        assert!(router.find(&Method::POST, "/api/todos").is_none());
        assert!(router.find(&Method::GET, "/api/todos/1").is_none());
    }

    #[test]
    fn captures_params() {
        let router = router_with(&[("PUT", "/api/todos/:id")]);
        let (_, params) = router.find(&Method::PUT, "/api/todos/42").unwrap();
        assert_eq!(params.get("id").unwrap(), "42");
    }

    #[test]
    fn routes_of_different_length_do_not_collide() {
        let router = router_with(&[("GET", "/api/posts/:id"), ("GET", "/api/posts/user/:userId")]);

        let (_, params) = router.find(&Method::GET, "/api/posts/user").unwrap();
        assert_eq!(params.get("id").unwrap(), "user");

        let (_, params) = router.find(&Method::GET, "/api/posts/user/7").unwrap();
        assert_eq!(params.get("userId").unwrap(), "7");
    }

    #[test]
    fn fewest_params_wins_on_equal_length() {
        let router = router_with(&[("GET", "/api/posts/:id"), ("GET", "/api/posts/latest")]);
        let (_, params) = router.find(&Method::GET, "/api/posts/latest").unwrap();
        assert!(params.is_empty());
    }
}
