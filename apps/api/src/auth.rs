//! Shared-secret API key authentication (`X-API-KEY` header).

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Authentication middleware.
/// Validates the `X-API-KEY` header against the configured key.
pub async fn api_key_middleware(
    State(expected): State<Arc<str>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|key| !key.is_empty());

    match provided {
        Some(key) if key == &*expected => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Invalid API key attempted");
            Err(AppError::Unauthorized("Invalid API Key"))
        }
        None => {
            tracing::warn!("Missing X-API-KEY header");
            Err(AppError::Unauthorized("Missing API Key"))
        }
    }
}
