//! Bearer Tokens
//!
//! Compact HS256-signed JWTs (`header.payload.signature`, base64url) that
//! carry a user id and email. There is no server-side token store: a token
//! is trusted only if its signature verifies against the server secret and
//! its `exp` has not passed.
//!
//! The secret is handed to [`TokenService::new`] by the caller; nothing in
//! here reads the environment.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default token lifetime (1 day)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// What a token asserts about its bearer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub user_id: i32,
    pub email: String,
}

/// Claims as they appear in the token body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub user_id: i32,
    pub email: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
}

impl TokenClaims {
    pub fn payload(&self) -> TokenPayload {
        TokenPayload {
            user_id: self.user_id,
            email: self.email.clone(),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Why a token was rejected
///
/// Only for logs. Callers deciding whether someone is authenticated use
/// [`TokenService::verify`], which folds all of these into `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Token lifetime is out of range")]
    InvalidTtl,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
            _ => TokenError::Malformed,
        }
    }
}

/// Issues and verifies bearer tokens with a fixed lifetime
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Service with the default 1-day lifetime
    pub fn with_default_ttl(secret: &[u8]) -> Self {
        Self::new(secret, DEFAULT_TOKEN_TTL)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `payload`, valid from now for the configured lifetime
    pub fn issue(&self, payload: &TokenPayload) -> Result<String, TokenError> {
        self.issue_at(payload, Utc::now())
    }

    /// Sign a token as if issued at `issued_at`
    pub fn issue_at(
        &self,
        payload: &TokenPayload,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let ttl = chrono::Duration::from_std(self.ttl).map_err(|_| TokenError::InvalidTtl)?;
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::InvalidTtl)?;

        let claims = TokenClaims {
            user_id: payload.user_id,
            email: payload.email.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token, telling why it was rejected
    pub fn verify_detailed(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Verify a token; any failure means "not authenticated"
    pub fn verify(&self, token: &str) -> Option<TokenClaims> {
        self.verify_detailed(token).ok()
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-jwt-secret-with-enough-bytes";

    fn service() -> TokenService {
        TokenService::with_default_ttl(SECRET)
    }

    fn payload() -> TokenPayload {
        TokenPayload {
            user_id: 1,
            email: "test@example.com".to_string(),
        }
    }

    #[test]
    fn test_token_has_three_segments() {
        let token = service().issue(&payload()).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let service = service();
        let token = service.issue(&payload()).unwrap();

        let claims = service.verify(&token).expect("fresh token should verify");
        assert_eq!(claims.payload(), payload());
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_claims_are_camel_case() {
        let claims = TokenClaims {
            user_id: 7,
            email: "a@b.co".to_string(),
            iat: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["email"], "a@b.co");
    }

    #[test]
    fn test_rejects_garbage() {
        let service = service();
        assert!(service.verify("invalid.token.here").is_none());
        assert!(service.verify("").is_none());
        assert!(service.verify("only.two").is_none());
        assert_eq!(
            service.verify_detailed("invalid.token.here"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_rejects_tampered_tail() {
        let service = service();
        let token = service.issue(&payload()).unwrap();
        let tampered = format!("{}xxxxx", &token[..token.len() - 5]);

        assert!(service.verify(&tampered).is_none());
    }

    #[test]
    fn test_any_signature_character_mutation_invalidates() {
        let service = service();
        let token = service.issue(&payload()).unwrap();
        let signature_start = token.rfind('.').unwrap() + 1;

        for i in signature_start..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let mutated = String::from_utf8(bytes).unwrap();

            assert!(
                service.verify(&mutated).is_none(),
                "mutation at byte {} was accepted",
                i
            );
        }
    }

    #[test]
    fn test_body_mutation_invalidates() {
        let service = service();
        let token = service.issue(&payload()).unwrap();
        let body_start = token.find('.').unwrap() + 1;
        let body_end = token.rfind('.').unwrap();

        for i in body_start..body_end {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let mutated = String::from_utf8(bytes).unwrap();

            assert!(service.verify(&mutated).is_none());
        }
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = service().issue(&payload()).unwrap();
        let other = TokenService::with_default_ttl(b"a-completely-different-secret");

        assert_eq!(other.verify_detailed(&token), Err(TokenError::BadSignature));
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn test_expired_token_fails() {
        let service = service();
        let two_days_ago = Utc::now() - chrono::Duration::days(2);
        let token = service.issue_at(&payload(), two_days_ago).unwrap();

        assert_eq!(service.verify_detailed(&token), Err(TokenError::Expired));
        assert!(service.verify(&token).is_none());
    }

    #[test]
    fn test_custom_ttl() {
        let service = TokenService::new(SECRET, Duration::from_secs(60));
        let token = service.issue(&payload()).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 60);
        assert!(claims.expires_at().unwrap() > claims.issued_at().unwrap());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug_output = format!("{:?}", service());
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("test-jwt-secret"));
    }
}
