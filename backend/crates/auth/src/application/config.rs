//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::password::{Argon2Hasher, PasswordCost, PasswordHashError};
use platform::token::{DEFAULT_TOKEN_TTL, TokenService};

/// Minimum length of a randomly generated signing secret
const RANDOM_SECRET_LEN: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 key for bearer tokens
    pub jwt_secret: Vec<u8>,
    /// Token lifetime (1 day)
    pub token_ttl: Duration,
    /// Argon2id cost for hashing and verification
    pub password_cost: PasswordCost,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            token_ttl: DEFAULT_TOKEN_TTL,
            password_cost: PasswordCost::default(),
        }
    }
}

impl AuthConfig {
    /// Create config with the given signing secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// Create config with a random signing secret (for development)
    ///
    /// Tokens stop verifying after a restart.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; RANDOM_SECRET_LEN];
        rand::rng().fill_bytes(&mut secret);
        Self::new(secret)
    }

    /// Create config for development (random secret, cheapest hashing cost)
    pub fn development() -> Self {
        Self {
            password_cost: PasswordCost::minimal(),
            ..Self::with_random_secret()
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_password_cost(mut self, cost: PasswordCost) -> Self {
        self.password_cost = cost;
        self
    }

    /// Build the token service for this config
    pub fn token_service(&self) -> TokenService {
        TokenService::new(&self.jwt_secret, self.token_ttl)
    }

    /// Build the password hasher for this config
    pub fn password_hasher(&self) -> Result<Argon2Hasher, PasswordHashError> {
        Argon2Hasher::new(self.password_cost)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_cost", &self.password_cost)
            .finish()
    }
}
