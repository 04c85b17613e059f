//! Client Session Store
//!
//! Keeps the bearer token and the logged-in user between page loads, under
//! the `token` and `user` keys. A store built without storage stands in for
//! server-side rendering: every read is empty and every write is dropped.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::navigation::Navigator;
use crate::storage::KeyValueStorage;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Path `logout` sends the browser to
pub const LOGIN_PATH: &str = "/login";

/// User as returned by `POST /login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i32,
    pub name: String,
    pub email: String,
}

pub struct SessionStore<S, N> {
    storage: Option<S>,
    navigator: N,
}

impl<S, N> SessionStore<S, N>
where
    S: KeyValueStorage,
    N: Navigator,
{
    /// Store backed by browser storage
    pub fn new(storage: S, navigator: N) -> Self {
        Self {
            storage: Some(storage),
            navigator,
        }
    }

    /// Store for a context with no browser storage
    pub fn without_storage(navigator: N) -> Self {
        Self {
            storage: None,
            navigator,
        }
    }

    /// Whether this store runs in a browser context
    pub fn is_browser(&self) -> bool {
        self.storage.is_some()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn get_token(&self) -> Option<String> {
        self.storage
            .as_ref()?
            .get(TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    /// Stored user, if any
    ///
    /// An empty entry or a JSON `null` reads as no user. Any other value
    /// that does not parse is an error.
    pub fn get_user(&self) -> Result<Option<SessionUser>, SessionError> {
        let Some(raw) = self
            .storage
            .as_ref()
            .and_then(|s| s.get(USER_KEY))
            .filter(|raw| !raw.is_empty())
        else {
            return Ok(None);
        };

        serde_json::from_str::<Option<SessionUser>>(&raw).map_err(SessionError::CorruptUser)
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    /// Persist a fresh login
    pub fn save(&self, token: &str, user: &SessionUser) -> Result<(), SessionError> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };

        let user_json = serde_json::to_string(user).map_err(SessionError::Serialize)?;
        storage.set(TOKEN_KEY, token);
        storage.set(USER_KEY, &user_json);

        Ok(())
    }

    /// Forget the session and reload on the login page
    pub fn logout(&self) {
        let Some(storage) = &self.storage else {
            return;
        };

        storage.remove(TOKEN_KEY);
        storage.remove(USER_KEY);
        tracing::info!("Logged out");

        self.navigator.assign(LOGIN_PATH);
    }
}
