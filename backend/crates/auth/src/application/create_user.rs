//! Create User Use Case
//!
//! Seeds a user account. There is no public registration route; this is
//! driven by the `create-user` command.

use std::sync::Arc;

use platform::password::{Argon2Hasher, ClearTextPassword};

use crate::domain::entity::user::{NewUser, PublicUser};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Create user input (raw, validated by the use case)
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Create user use case
pub struct CreateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<Argon2Hasher>,
}

impl<U> CreateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<Argon2Hasher>) -> Self {
        Self { user_repo, hasher }
    }

    pub async fn execute(&self, input: CreateUserInput) -> AuthResult<PublicUser> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AuthError::Validation("Name cannot be empty".to_string()));
        }

        let email = Email::new(input.email)?;
        let password = ClearTextPassword::with_policy(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let hasher = Arc::clone(&self.hasher);
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;

        let user = self
            .user_repo
            .create(&NewUser {
                name,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User created");

        Ok(user.to_public())
    }
}
