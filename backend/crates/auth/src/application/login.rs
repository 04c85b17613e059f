//! Login Use Case
//!
//! Authenticates a user by email and password and issues a bearer token.

use std::sync::Arc;

use platform::password::{Argon2Hasher, ClearTextPassword};
use platform::token::{TokenPayload, TokenService};

use crate::domain::entity::user::PublicUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Login input, already shape-validated
#[derive(Debug)]
pub struct LoginInput {
    pub email: Email,
    pub password: ClearTextPassword,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed bearer token
    pub token: String,
    pub user: PublicUser,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<Argon2Hasher>,
    tokens: Arc<TokenService>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<Argon2Hasher>, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let user = self.user_repo.find_by_email(&input.email).await?;

        // Argon2 is CPU-bound; keep it off the async workers.
        // An unknown email still pays for one verification.
        let hasher = Arc::clone(&self.hasher);
        let digest = user.as_ref().map(|u| u.password_hash.clone());
        let password = input.password;
        let password_valid = tokio::task::spawn_blocking(move || match digest {
            Some(digest) => hasher.verify(&password, &digest),
            None => {
                hasher.verify_dummy(&password);
                false
            }
        })
        .await?;

        let Some(user) = user.filter(|_| password_valid) else {
            tracing::warn!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let token = self.tokens.issue(&TokenPayload {
            user_id: user.id.value(),
            email: user.email.as_str().to_string(),
        })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput {
            token,
            user: user.to_public(),
        })
    }
}
