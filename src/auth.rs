use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::http::{Error, Request, Result};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i32,
    pub username: String,
    pub exp: usize,
}

pub fn create_token(
    user_id: i32,
    username: &str,
    config: &AuthConfig,
) -> std::result::Result<String, jsonwebtoken::errors::Error> {
    let expiration = (chrono::Utc::now() + chrono::Duration::hours(config.token_hours)).timestamp();

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

pub fn verify_token(
    token: &str,
    config: &AuthConfig,
) -> std::result::Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Resolve the authenticated identity from the request's bearer token.
/// Mutating handlers call this before touching anything.
pub fn authenticate(req: &Request, config: &AuthConfig) -> Result<Claims> {
    let token = req
        .header("authorization")
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| Error::Unauthorized("Not authorized, no token".into()))?;

    verify_token(token, config)
        .map_err(|_| Error::Unauthorized("Not authorized, token failed".into()))
}
