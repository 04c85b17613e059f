//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use std::sync::Arc;

use platform::password::Argon2Hasher;
use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::application::LoginUseCase;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ErrorResponse, HealthResponse, LoginRequest, LoginResponse, MeResponse,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Greeting served on `GET /`
pub const HEALTH_MESSAGE: &str = "Hello from Origo API!";

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub hasher: Arc<Argon2Hasher>,
    pub tokens: Arc<TokenService>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    /// Build state, deriving the hasher and token service from `config`
    pub fn new(repo: R, config: AuthConfig) -> AuthResult<Self> {
        let hasher = config.password_hasher()?;
        let tokens = config.token_service();

        Ok(Self {
            repo: Arc::new(repo),
            hasher: Arc::new(hasher),
            tokens: Arc::new(tokens),
        })
    }
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

// ============================================================================
// Health
// ============================================================================

/// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "API is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE.to_string(),
    })
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Server failure", body = ErrorResponse),
    )
)]
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    // Bad JSON, missing fields and wrong content type are all 400
    let Json(req) = payload.map_err(|rejection| AuthError::Validation(rejection.body_text()))?;
    let input = req.validate()?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.tokens.clone(),
    );

    let output = use_case.execute(input).await?;

    Ok(Json(LoginResponse {
        token: output.token,
        user: output.user,
    }))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /me
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Identity from the token", body = MeResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn me(Extension(user): Extension<AuthenticatedUser>) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: user.user_id.value(),
        email: user.email,
    })
}
