//! Password Hashing and Verification
//!
//! Argon2id password handling with:
//! - Self-describing PHC digests (algorithm, version, cost, salt and hash)
//! - Tunable cost (memory, iterations, parallelism)
//! - Zeroization of clear text passwords
//! - Verification that never fails past the boundary: a malformed digest
//!   simply does not match
//! - A dummy verification for unknown accounts, so a missing user costs the
//!   same Argon2 work as a wrong password
//!
//! ## Examples
//! ```rust
//! use platform::password::{Argon2Hasher, ClearTextPassword, PasswordCost};
//!
//! let hasher = Argon2Hasher::new(PasswordCost::minimal()).unwrap();
//! let password = ClearTextPassword::new("testpassword123");
//! let digest = hasher.hash(&password).unwrap();
//!
//! assert!(hasher.verify(&password, digest.as_phc_string()));
//! assert!(!hasher.verify(&ClearTextPassword::new("nope"), digest.as_phc_string()));
//! ```

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum accepted password length, in Unicode code points
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum accepted password length, in Unicode code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Cost parameters rejected by Argon2
    #[error("Invalid password cost parameters: {0}")]
    InvalidCost(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Input is NFKC-normalized so that visually identical passwords typed on
/// different keyboards hash the same. Does not implement `Clone`; `Debug`
/// output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap user input without applying any policy.
    ///
    /// Login attempts go through here: policy is enforced when passwords
    /// are created, never when they are checked.
    pub fn new(raw: impl Into<String>) -> Self {
        let mut raw = raw.into();
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    /// Wrap user input and enforce the creation policy
    pub fn with_policy(raw: impl Into<String>) -> Result<Self, PasswordPolicyError> {
        let password = Self::new(raw);
        password.check_policy()?;
        Ok(password)
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        let char_count = self.0.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Space, tab and newline are allowed
        if self
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(())
    }

    /// Length in Unicode code points
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Cost
// ============================================================================

/// Argon2id cost parameters
///
/// Defaults follow the OWASP recommendation (m=19456 KiB, t=2, p=1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for PasswordCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordCost {
    /// Cheapest cost Argon2 accepts. Only meant for tests and local seeding.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Input for the digest behind [`Argon2Hasher::verify_dummy`]
const DUMMY_PASSWORD: &str = "origo-dummy-password";

/// Produces and verifies Argon2id password digests
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
    /// Digest at this hasher's cost, checked when there is no stored one
    dummy_digest: String,
}

impl Argon2Hasher {
    pub fn new(cost: PasswordCost) -> Result<Self, PasswordHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidCost(e.to_string()))?;

        let mut hasher = Self {
            params,
            dummy_digest: String::new(),
        };
        hasher.dummy_digest = hasher
            .hash(&ClearTextPassword::new(DUMMY_PASSWORD))?
            .into_phc_string();
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt
    ///
    /// Two calls with the same password yield different digests.
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        // 128-bit random salt
        let salt = SaltString::generate(OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Check a password against a stored digest
    ///
    /// The cost recorded in the digest is used, not this hasher's cost, so
    /// digests created under an older cost keep verifying. Any malformed
    /// digest returns `false`.
    pub fn verify(&self, password: &ClearTextPassword, digest: &str) -> bool {
        let parsed_hash = match PasswordHash::new(digest) {
            Ok(h) => h,
            Err(_) => return false,
        };

        // Argon2 compares in constant time
        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Run a full verification against the internal dummy digest
    ///
    /// Called when no account matches, so the caller spends the same time
    /// as a wrong password against a real digest. The result is discarded.
    pub fn verify_dummy(&self, password: &ClearTextPassword) {
        let _ = self.verify(password, &self.dummy_digest);
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Password digest in PHC string format
///
/// `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    pub fn into_phc_string(self) -> String {
        self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
