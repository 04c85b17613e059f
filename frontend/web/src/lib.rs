//! Origo Web Client
//!
//! Client-side state for the login flow, independent of any renderer:
//! - `storage` - browser-style key/value persistence
//! - `session` - token and user kept between page loads
//! - `api` - HTTP calls to the Origo API (login and root)
//! - `login_form` - form state machine, observable through a watch channel
//! - `pages` - route guards for the home and login pages, plus the home
//!   page's root panel
//! - `navigation` - hard redirects vs. in-app route changes

pub mod api;
pub mod config;
pub mod error;
pub mod login_form;
pub mod navigation;
pub mod pages;
pub mod session;
pub mod storage;

// Re-exports for convenience
pub use api::{HttpLoginApi, LoginApi, LoginFailure, LoginResponse, RootApi, RootResponse};
pub use config::WebConfig;
pub use error::{FetchError, SessionError, WebError};
pub use login_form::{FormStatus, FormView, LoginForm, SubmitOutcome};
pub use navigation::{Navigation, Navigator, RecordingNavigator};
pub use pages::{HomePage, HomeScreen, LoginPage, RootData, home_page, login_page};
pub use session::{SessionStore, SessionUser};
pub use storage::{KeyValueStorage, MemoryStorage};
