//! Standard layer stack assembly

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::guards::{api_key_guard, maintenance_gate};
use crate::request_id::request_id;
use crate::state::MiddlewareState;

/// Apply the standard middleware list to a router
///
/// Order, outermost first: trace, timeout, request id, maintenance gate,
/// api key guard.
pub fn apply(router: Router, state: Arc<MiddlewareState>, request_timeout: Duration) -> Router {
    router
        .layer(middleware::from_fn_with_state(state.clone(), api_key_guard))
        .layer(middleware::from_fn_with_state(state, maintenance_gate))
        .layer(middleware::from_fn(request_id))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guards::API_KEY_HEADER;
    use crate::request_id::REQUEST_ID_HEADER;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    fn test_router(state: Arc<MiddlewareState>) -> Router {
        let router = Router::new()
            .route("/", get(|| async { "ok" }))
            .route("/healthz", get(|| async { "ok" }))
            .route("/admin/flush", get(|| async { "ok" }));
        apply(router, state, Duration::from_secs(5))
    }

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn attaches_a_request_id() {
        let app = test_router(MiddlewareState::new(None));

        let response = app.oneshot(request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn preserves_an_inbound_request_id() {
        let app = test_router(MiddlewareState::new(None));
        let req = Request::builder()
            .uri("/")
            .header(REQUEST_ID_HEADER, "req-42")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();

        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).unwrap(),
            "req-42"
        );
    }

    #[tokio::test]
    async fn maintenance_rejects_everything_but_health() {
        let state = MiddlewareState::new(None);
        state.enter_maintenance().await;
        let app = test_router(state.clone());

        let blocked = app.clone().oneshot(request("/")).await.unwrap();
        assert_eq!(blocked.status(), StatusCode::SERVICE_UNAVAILABLE);

        let health = app.oneshot(request("/healthz")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_paths_require_the_configured_key() {
        let state = MiddlewareState::new(Some("sekrit".to_string()));
        let app = test_router(state);

        let missing = app.clone().oneshot(request("/admin/flush")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let wrong = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/admin/flush")
                    .header(API_KEY_HEADER, "guess")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

        let ok = app
            .oneshot(
                Request::builder()
                    .uri("/admin/flush")
                    .header(API_KEY_HEADER, "sekrit")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn non_admin_paths_skip_the_key_guard() {
        let state = MiddlewareState::new(Some("sekrit".to_string()));
        let app = test_router(state);

        let response = app.oneshot(request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
