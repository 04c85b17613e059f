//! In-Memory Repository
//!
//! Backs the router tests and local runs without a database.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// User repository held in process memory
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
    lookups: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `find_by_email` calls served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);

        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }

    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        // SERIAL starts at 1
        let id = i32::try_from(users.len() + 1)
            .map_err(|_| AuthError::Internal("User id space exhausted".to_string()))?;

        let created = User {
            id: UserId::new(id),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.as_phc_string().to_string(),
        };
        users.push(created.clone());

        Ok(created)
    }
}
