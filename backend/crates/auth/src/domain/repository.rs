//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find a user by exact email match
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Insert a new user, returning it with its assigned id
    ///
    /// Fails with [`AuthError::EmailTaken`](crate::error::AuthError::EmailTaken)
    /// when the email is already registered.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;
}
