//! User Entity
//!
//! A stored user row, plus the public projection returned to clients.

use platform::password::HashedPassword;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::value_object::{email::Email, user_id::UserId};

/// User entity
///
/// Carries the stored password digest, so it never leaves the server as-is.
/// Use [`User::to_public`] for anything sent over the wire.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique across users, compared case-sensitively
    pub email: Email,
    /// Self-describing PHC digest
    pub password_hash: String,
}

impl User {
    /// Public projection without the password digest
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// User as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PublicUser {
    #[schema(value_type = i32, example = 1)]
    pub id: UserId,
    #[schema(example = "Test User")]
    pub name: String,
    #[schema(value_type = String, format = Email, example = "test@example.com")]
    pub email: Email,
}

/// A user about to be inserted; the id is assigned by the store
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: HashedPassword,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_projection_has_no_password() {
        let user = User {
            id: UserId::new(1),
            name: "Test User".to_string(),
            email: Email::new("test@example.com").unwrap(),
            password_hash: "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".to_string(),
        };

        let json = serde_json::to_value(user.to_public()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Test User", "email": "test@example.com"})
        );
    }
}
