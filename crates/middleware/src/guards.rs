//! Gate middlewares for internal services

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::state::MiddlewareState;

/// Header carrying the admin API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject requests while maintenance mode is active
///
/// Health and status endpoints stay reachable so probes can observe the
/// flag.
pub async fn maintenance_gate(
    State(state): State<Arc<MiddlewareState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = request.uri().path();
    if path.starts_with("/healthz") || path.starts_with("/status") {
        return Ok(next.run(request).await);
    }

    if state.in_maintenance().await {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(next.run(request).await)
}

/// Require `x-api-key` on admin paths when a key is configured
pub async fn api_key_guard(
    State(state): State<Arc<MiddlewareState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if !request.uri().path().starts_with("/admin/") {
        return Ok(next.run(request).await);
    }

    match &state.admin_api_key {
        // no key configured: admin endpoints are open (internal tooling)
        None => Ok(next.run(request).await),
        Some(expected) => {
            let provided = request
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|value| value.to_str().ok());

            if provided == Some(expected.as_str()) {
                Ok(next.run(request).await)
            } else {
                Err(StatusCode::UNAUTHORIZED)
            }
        }
    }
}
