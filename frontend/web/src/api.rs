//! Origo API Client
//!
//! The login call the form makes and the root call the home page makes.
//! Both sit behind traits so the screens can be driven without a server.

use serde::{Deserialize, Serialize};

use crate::config::WebConfig;
use crate::error::{FetchError, WebError};
use crate::session::SessionUser;

/// Message shown when the server rejects a login without saying why
pub const FALLBACK_REJECTION_MESSAGE: &str = "Invalid credentials";

/// Message shown when the call itself fails
pub const NETWORK_ERROR_MESSAGE: &str = "An error occurred";

/// Successful `POST /login` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

/// Why a login call did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
    /// Non-success status, with the server's `error` message if it sent one
    Rejected(Option<String>),
    /// No usable response at all
    Network(String),
}

impl LoginFailure {
    /// Text for the form's error banner
    pub fn message(&self) -> &str {
        match self {
            LoginFailure::Rejected(Some(message)) => message,
            LoginFailure::Rejected(None) => FALLBACK_REJECTION_MESSAGE,
            LoginFailure::Network(_) => NETWORK_ERROR_MESSAGE,
        }
    }
}

#[trait_variant::make(LoginApi: Send)]
pub trait LocalLoginApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, LoginFailure>;
}

/// `GET /` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

#[trait_variant::make(RootApi: Send)]
pub trait LocalRootApi {
    async fn fetch_root(&self) -> Result<RootResponse, FetchError>;
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// [`LoginApi`] and [`RootApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpLoginApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLoginApi {
    pub fn new(config: &WebConfig) -> Result<Self, WebError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &WebConfig) -> Self {
        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.base_url)
    }

    pub fn root_url(&self) -> String {
        format!("{}/", self.base_url)
    }
}

impl LoginApi for HttpLoginApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, LoginFailure> {
        let response = self
            .client
            .post(self.login_url())
            .json(&LoginBody { email, password })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Login request failed");
                LoginFailure::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            // A missing or unreadable body falls back to the generic message
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.is_empty());
            tracing::debug!(status = status.as_u16(), "Login rejected");
            return Err(LoginFailure::Rejected(message));
        }

        response.json::<LoginResponse>().await.map_err(|e| {
            tracing::warn!(error = %e, "Unreadable login response");
            LoginFailure::Network(e.to_string())
        })
    }
}

impl RootApi for HttpLoginApi {
    async fn fetch_root(&self) -> Result<RootResponse, FetchError> {
        let response = self.client.get(self.root_url()).send().await.map_err(|e| {
            tracing::warn!(error = %e, "Root request failed");
            FetchError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<RootResponse>()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}
