//! Request id middleware

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Attach a request id to the request and echo it on the response
///
/// An inbound `x-request-id` is preserved so ids stay stable across
/// service hops; otherwise a fresh UUID is generated.
pub async fn request_id(mut request: Request<Body>, next: Next) -> Response {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    match HeaderValue::from_str(&id) {
        Ok(value) => {
            request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
            let mut response = next.run(request).await;
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
            response
        }
        // an unrepresentable inbound id is dropped rather than rejected
        Err(_) => next.run(request).await,
    }
}
