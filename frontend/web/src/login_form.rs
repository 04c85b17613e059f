//! Login Form
//!
//! `Idle -> Submitting -> Authenticated | Error`. The current [`FormView`]
//! is published on a watch channel; a renderer subscribes and redraws on
//! every change.

use tokio::sync::watch;

use crate::api::{LoginApi, NETWORK_ERROR_MESSAGE};
use crate::navigation::Navigator;
use crate::session::SessionStore;
use crate::storage::KeyValueStorage;

pub const LOGIN_LABEL: &str = "Login";
pub const SUBMITTING_LABEL: &str = "Logging in...";

/// Where a successful login lands
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Authenticated,
    Error(String),
}

/// Everything a renderer needs to draw the form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormView {
    pub email: String,
    pub password: String,
    pub status: FormStatus,
}

impl FormView {
    /// Email input, password input and submit button share this flag
    pub fn controls_disabled(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn button_label(&self) -> &'static str {
        if self.controls_disabled() {
            SUBMITTING_LABEL
        } else {
            LOGIN_LABEL
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// What a call to [`LoginForm::submit`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight
    Ignored,
    Authenticated,
    Failed(String),
}

pub struct LoginForm<A, S, N> {
    api: A,
    session: SessionStore<S, N>,
    view: watch::Sender<FormView>,
}

impl<A, S, N> LoginForm<A, S, N>
where
    A: LoginApi,
    S: KeyValueStorage,
    N: Navigator,
{
    pub fn new(api: A, session: SessionStore<S, N>) -> Self {
        let (view, _) = watch::channel(FormView::default());
        Self { api, session, view }
    }

    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.view.subscribe()
    }

    /// Snapshot of the current view
    pub fn view(&self) -> FormView {
        self.view.borrow().clone()
    }

    pub fn session(&self) -> &SessionStore<S, N> {
        &self.session
    }

    /// Ignored while the input is disabled
    pub fn set_email(&self, email: impl Into<String>) {
        let email = email.into();
        self.view.send_if_modified(|view| {
            if view.controls_disabled() {
                return false;
            }
            view.email = email;
            true
        });
    }

    /// Ignored while the input is disabled
    pub fn set_password(&self, password: impl Into<String>) {
        let password = password.into();
        self.view.send_if_modified(|view| {
            if view.controls_disabled() {
                return false;
            }
            view.password = password;
            true
        });
    }

    /// Submit the current email and password
    ///
    /// No timeout: the form stays in `Submitting` until the call settles.
    pub async fn submit(&self) -> SubmitOutcome {
        // Check-and-enter under the channel lock so a second submit can't slip in
        let entered = self.view.send_if_modified(|view| {
            if view.controls_disabled() {
                return false;
            }
            view.status = FormStatus::Submitting;
            true
        });
        if !entered {
            tracing::debug!("Submit ignored, login already in flight");
            return SubmitOutcome::Ignored;
        }

        let (email, password) = {
            let view = self.view.borrow();
            (view.email.clone(), view.password.clone())
        };

        let result = self.api.login(&email, &password).await;

        let outcome = match result {
            Ok(response) => match self.session.save(&response.token, &response.user) {
                Ok(()) => SubmitOutcome::Authenticated,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to store session");
                    SubmitOutcome::Failed(NETWORK_ERROR_MESSAGE.to_string())
                }
            },
            Err(failure) => SubmitOutcome::Failed(failure.message().to_string()),
        };

        self.view.send_modify(|view| {
            view.status = match &outcome {
                SubmitOutcome::Failed(message) => FormStatus::Error(message.clone()),
                _ => FormStatus::Authenticated,
            };
        });

        if outcome == SubmitOutcome::Authenticated {
            tracing::info!("Login succeeded");
            self.session.navigator().assign(HOME_PATH);
        }

        outcome
    }
}
