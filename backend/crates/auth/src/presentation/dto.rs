//! API DTOs (Data Transfer Objects)

use platform::password::{ClearTextPassword, MIN_PASSWORD_LENGTH};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::login::LoginInput;
use crate::domain::entity::user::PublicUser;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Health
// ============================================================================

/// Greeting returned by `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "Hello from Origo API!")]
    pub message: String,
}

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid credentials")]
    pub error: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(format = Email, example = "test@example.com")]
    pub email: String,
    #[schema(min_length = 6, example = "password123")]
    pub password: String,
}

impl LoginRequest {
    /// Check the request shape and convert it into use-case input
    ///
    /// Runs before any credential lookup.
    pub fn validate(self) -> AuthResult<LoginInput> {
        let email = Email::new(self.email)?;

        let password = ClearTextPassword::new(self.password);
        if password.char_count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        Ok(LoginInput { email, password })
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// HS256 bearer token
    pub token: String,
    pub user: PublicUser,
}

// ============================================================================
// Current User
// ============================================================================

/// Identity asserted by a verified bearer token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: i32,
    pub email: String,
}
