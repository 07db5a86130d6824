//! Minimal HTTP/1.1 service layer: request/response types, a path router
//! with `:param` segments, a middleware chain and the accept loop.

mod error;
mod extract;
mod macros;
mod request;
mod response;
mod router;
mod server;

pub use error::{Error, FieldError, Result};
pub use extract::{FromRequest, IntoResponse, Json};
pub use request::{Method, Request, Uri, Version};
pub use response::{Response, StatusCode};
pub use router::Router;
pub use server::Server;

use std::future::Future;
use std::pin::Pin;

/// Outcome of a middleware: either continue with the (possibly modified)
/// request/response pair or short-circuit with a final response.
#[derive(Debug)]
pub enum Flow {
    Stop(Response),
    Next(Request, Response),
}

pub trait AsyncHandler: Send + Sync {
    fn call(&self, req: Request, res: Response) -> Pin<Box<dyn Future<Output = Response> + Send>>;
}

impl<F, Fut> AsyncHandler for F
where
    F: Fn(Request, Response) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, req: Request, res: Response) -> Pin<Box<dyn Future<Output = Response> + Send>> {
        Box::pin(self(req, res))
    }
}

pub type Middleware = fn(Request, Response) -> Flow;
