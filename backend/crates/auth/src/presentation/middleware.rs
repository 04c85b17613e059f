//! Auth Middleware
//!
//! Bearer-token check for protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use platform::token::TokenService;

use crate::domain::value_object::user_id::UserId;
use crate::error::AuthError;

/// Identity of the caller, stored in request extensions by [`require_bearer`]
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// Middleware that requires a valid `Authorization: Bearer` token
///
/// Every failure is answered with the same 401; the reason is only logged.
pub async fn require_bearer(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers()).ok_or(AuthError::NotAuthenticated)?;

    let claims = tokens.verify_detailed(token).map_err(|e| {
        tracing::debug!(reason = %e, "Bearer token rejected");
        AuthError::NotAuthenticated
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId::new(claims.user_id),
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
