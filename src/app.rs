use sea_orm::DatabaseConnection;

use crate::config::AuthConfig;
use crate::handlers::{auth as auth_handlers, posts, todos};
use crate::http::{Flow, Method, Request, Response, Server};

/// Shared application state, cloned into each handler closure. The
/// database handle is the only cross-request state.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: AuthConfig,
}

fn cors_middleware(req: Request, res: Response) -> Flow {
    let res = res
        .with_header("Access-Control-Allow-Origin", "*")
        .with_header(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, DELETE, OPTIONS",
        )
        .with_header(
            "Access-Control-Allow-Headers",
            "Content-Type, Authorization",
        );

    if req.method == Method::OPTIONS {
        return Flow::Stop(res);
    }

    Flow::Next(req, res)
}

/// Wrap a `(AppState, Request) -> Result<Response>` handler into the
/// server's handler shape, mapping errors to their HTTP responses.
macro_rules! handler {
    ($state:expr, $f:path) => {{
        let state = $state.clone();
        move |req: Request, _res: Response| {
            let state = state.clone();
            async move {
                match $f(state, req).await {
                    Ok(res) => res,
                    Err(err) => err.into_response(),
                }
            }
        }
    }};
}

pub fn build_server(state: AppState) -> Server {
    Server::new()
        .middleware(cors_middleware)
        .get("/health", |_req: Request, res: Response| async move {
            res.text("OK")
        })
        .get("/api/todos", handler!(state, todos::list))
        .post("/api/todos", handler!(state, todos::create))
        .put("/api/todos/:id", handler!(state, todos::update))
        .delete("/api/todos/:id", handler!(state, todos::remove))
        .get("/api/posts", handler!(state, posts::list))
        .get("/api/posts/user/:userId", handler!(state, posts::list_by_user))
        .get("/api/posts/:id", handler!(state, posts::get))
        .post("/api/posts", handler!(state, posts::create))
        .put("/api/posts/:id", handler!(state, posts::update))
        .delete("/api/posts/:id", handler!(state, posts::remove))
        .post("/api/auth/register", handler!(state, auth_handlers::register))
        .post("/api/auth/login", handler!(state, auth_handlers::login))
        .get("/api/auth/me", handler!(state, auth_handlers::me))
}
