//! OpenAPI Document
//!
//! Served as JSON on `/openapi.json` and rendered by Scalar on `/docs`.

use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::entity::user::PublicUser;
use crate::presentation::dto::{
    ErrorResponse, HealthResponse, LoginRequest, LoginResponse, MeResponse,
};
use crate::presentation::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Origo API",
        description = "Email and password login with bearer tokens",
        version = "1.0.0"
    ),
    paths(handlers::health, handlers::login, handlers::me),
    components(schemas(
        HealthResponse,
        LoginRequest,
        LoginResponse,
        MeResponse,
        PublicUser,
        ErrorResponse
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Login with email and password")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` scheme referenced by protected routes
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// GET /openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
