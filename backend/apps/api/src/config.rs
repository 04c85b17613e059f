//! Server Configuration
//!
//! Reads the process environment (after `.env` is loaded) into typed config.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::password::PasswordCost;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3333";

/// Default connection pool size
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub auth: AuthConfig,
}

impl ApiConfig {
    /// Load from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let db_max_connections =
            parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;

        Ok(Self {
            database_url,
            bind_addr,
            db_max_connections,
            auth: auth_config_from_lookup(&lookup)?,
        })
    }
}

/// Token and password-hashing settings for the server
pub fn auth_config_from_lookup<F>(lookup: &F) -> anyhow::Result<AuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
        Some(secret) => AuthConfig::new(secret.into_bytes()),
        None if cfg!(debug_assertions) => {
            tracing::warn!(
                "JWT_SECRET not set, using a random secret; tokens will not survive a restart"
            );
            AuthConfig::with_random_secret()
        }
        None => bail!("JWT_SECRET must be set in production"),
    };

    let ttl_secs = parse_or(lookup, "JWT_TTL_SECS", base.token_ttl.as_secs())?;
    if ttl_secs == 0 {
        bail!("JWT_TTL_SECS must be positive");
    }

    Ok(base
        .with_token_ttl(Duration::from_secs(ttl_secs))
        .with_password_cost(password_cost_from_lookup(lookup)?))
}

/// Argon2 cost from `PASSWORD_*`
///
/// The `create-user` command only hashes, so it reads this alone and never
/// needs `JWT_SECRET`.
pub fn password_cost_from_lookup<F>(lookup: &F) -> anyhow::Result<PasswordCost>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = PasswordCost::default();
    Ok(PasswordCost {
        memory_kib: parse_or(lookup, "PASSWORD_MEMORY_KIB", defaults.memory_kib)?,
        iterations: parse_or(lookup, "PASSWORD_ITERATIONS", defaults.iterations)?,
        parallelism: parse_or(lookup, "PASSWORD_PARALLELISM", defaults.parallelism)?,
    })
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/origo"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
        assert_eq!(config.auth.jwt_secret, b"secret");
        assert_eq!(config.auth.token_ttl, Duration::from_secs(86_400));
        assert_eq!(config.auth.password_cost, PasswordCost::default());
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/origo"),
            ("JWT_SECRET", "secret"),
            ("JWT_TTL_SECS", "60"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("PASSWORD_MEMORY_KIB", "8"),
            ("PASSWORD_ITERATIONS", "1"),
            ("PASSWORD_PARALLELISM", "1"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.db_max_connections, 12);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(60));
        assert_eq!(config.auth.password_cost, PasswordCost::minimal());
    }

    #[test]
    fn test_missing_database_url() {
        let err = ApiConfig::from_lookup(lookup(&[("JWT_SECRET", "secret")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_invalid_numbers_are_reported() {
        let result = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/origo"),
            ("JWT_SECRET", "secret"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]));
        assert!(result.is_err());

        let zero_ttl = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/origo"),
            ("JWT_SECRET", "secret"),
            ("JWT_TTL_SECS", "0"),
        ]));
        assert!(zero_ttl.is_err());
    }

    #[test]
    fn test_password_cost_without_secret() {
        // No JWT_SECRET anywhere: must succeed in debug and release alike
        let cost = password_cost_from_lookup(&lookup(&[
            ("PASSWORD_MEMORY_KIB", "8"),
            ("PASSWORD_ITERATIONS", "1"),
            ("PASSWORD_PARALLELISM", "1"),
        ]))
        .unwrap();
        assert_eq!(cost, PasswordCost::minimal());

        let cost = password_cost_from_lookup(&lookup(&[])).unwrap();
        assert_eq!(cost, PasswordCost::default());

        assert!(password_cost_from_lookup(&lookup(&[("PASSWORD_ITERATIONS", "lots")])).is_err());
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_missing_secret_falls_back_in_debug() {
        let config =
            ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/origo")]))
                .unwrap();
        assert!(!config.auth.jwt_secret.is_empty());
    }
}
