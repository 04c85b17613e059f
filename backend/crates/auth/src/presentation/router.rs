//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer;
use crate::presentation::openapi::{self, ApiDoc};

/// Create the Auth router for any repository implementation
///
/// - `GET /` greeting
/// - `POST /login` email/password login
/// - `GET /me` identity from a bearer token
/// - `GET /openapi.json` and `GET /docs` (Scalar UI)
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_bearer,
        ));

    Router::new()
        .route("/", get(handlers::health))
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
