//! API Server
//!
//! Router assembly shared by the server binary and its tests.

pub mod config;

use auth::{AuthAppState, domain::UserRepository};
use axum::{
    Router,
    http::{Method, header},
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Build the full application router with CORS and request tracing
pub fn build_app<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .merge(auth::auth_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Any origin may call the API; credentials travel in the Authorization header
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::infra::InMemoryUserRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use platform::password::PasswordCost;
    use tower::ServiceExt;

    fn app() -> Router {
        let config =
            auth::AuthConfig::new("api-test-secret").with_password_cost(PasswordCost::minimal());
        build_app(AuthAppState::new(InMemoryUserRepository::new(), config).unwrap())
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let resp = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Hello from Origo API!");
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/login")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let resp = app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let methods = resp.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap()
            .to_string();
        for method in ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"] {
            assert!(methods.contains(method), "missing {method} in {methods}");
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let resp = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
