use crate::http::{Error, Request, Response, Result};

/// Trait for extracting typed data out of a request.
#[async_trait::async_trait]
pub trait FromRequest: Sized {
    async fn from_request(req: &Request) -> Result<Self>;
}

/// Extract and deserialize a JSON body.
pub struct Json<T>(pub T);

#[async_trait::async_trait]
impl<T> FromRequest for Json<T>
where
    T: serde::de::DeserializeOwned + Send,
{
    async fn from_request(req: &Request) -> Result<Self> {
        let body = req
            .body_str()
            .map_err(|_| Error::BadRequest("Invalid UTF-8 in body".into()))?;

        let value = serde_json::from_str(body)
            .map_err(|e| Error::BadRequest(format!("Invalid JSON: {}", e)))?;

        Ok(Json(value))
    }
}

/// Trait for converting handler return types to a Response.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        Response::default().json(self.0)
    }
}

impl<T> IntoResponse for Result<T>
where
    T: IntoResponse,
{
    fn into_response(self) -> Response {
        match self {
            Ok(value) => value.into_response(),
            Err(err) => err.into_response(),
        }
    }
}
