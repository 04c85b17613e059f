//! Platform Crate - Technical Infrastructure
//!
//! Cryptographic building blocks used by the login flow:
//! - Password hashing (Argon2id, self-describing PHC digests)
//! - Bearer tokens (HS256-signed JWTs with a fixed lifetime)

pub mod password;
pub mod token;
