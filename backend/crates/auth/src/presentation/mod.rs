//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, middleware and the OpenAPI document.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AuthenticatedUser, require_bearer};
pub use openapi::ApiDoc;
pub use router::auth_router;
