//! Web Client Configuration

use crate::error::WebError;

/// Default API location
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub api_base_url: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl WebConfig {
    /// Read `ORIGO_API_URL` from the process environment
    pub fn from_env() -> Result<Self, WebError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, WebError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(url) = lookup("ORIGO_API_URL").filter(|u| !u.trim().is_empty()) else {
            return Ok(Self::default());
        };

        let parsed = reqwest::Url::parse(url.trim()).map_err(|e| WebError::InvalidApiUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(WebError::InvalidApiUrl {
                url,
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(Self {
            api_base_url: url.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        let config = WebConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3333");
    }

    #[test]
    fn test_override_url() {
        let config =
            WebConfig::from_lookup(|_| Some("https://api.origo.example".to_string())).unwrap();
        assert_eq!(config.api_base_url, "https://api.origo.example");
    }

    #[test]
    fn test_invalid_url() {
        assert!(WebConfig::from_lookup(|_| Some("not a url".to_string())).is_err());
        assert!(WebConfig::from_lookup(|_| Some("ftp://example.com".to_string())).is_err());
    }
}
