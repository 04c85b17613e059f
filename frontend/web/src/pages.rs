//! Page Guards
//!
//! Decide what the home and login pages render, redirecting when the
//! session state says the visitor belongs elsewhere. Outside a browser
//! context both pages render nothing.
//!
//! Once a visitor is let into the home page, [`HomeScreen`] fetches `GET /`
//! and publishes the result on a watch channel, the same way the login form
//! publishes its view.

use tokio::sync::watch;

use crate::api::{RootApi, RootResponse};
use crate::login_form::HOME_PATH;
use crate::navigation::Navigator;
use crate::session::{LOGIN_PATH, SessionStore, SessionUser};
use crate::storage::KeyValueStorage;

pub const LOADING_LABEL: &str = "Loading...";

/// The `GET /` panel on the home page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootData {
    Loading,
    Error(String),
    Loaded(RootResponse),
}

impl RootData {
    /// Text shown in the panel
    pub fn render(&self) -> String {
        match self {
            RootData::Loading => LOADING_LABEL.to_string(),
            RootData::Error(message) => format!("Error: {message}"),
            RootData::Loaded(response) => {
                serde_json::to_string_pretty(response).unwrap_or_else(|_| response.message.clone())
            }
        }
    }
}

/// What the home page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomePage {
    /// Not in a browser context
    Blank,
    /// Sent to the login page
    Redirected,
    /// Logged in; `user` is `None` when the stored user is missing or unreadable
    Welcome {
        user: Option<SessionUser>,
        root: RootData,
    },
}

impl HomePage {
    /// `Welcome, <name> (<email>)`, when a user is known
    pub fn welcome_line(&self) -> Option<String> {
        match self {
            HomePage::Welcome {
                user: Some(user), ..
            } => Some(format!("Welcome, {} ({})", user.name, user.email)),
            _ => None,
        }
    }
}

/// What the login page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPage {
    Blank,
    /// Already logged in, sent home
    Redirected,
    Form,
}

pub fn home_page<S, N>(session: &SessionStore<S, N>) -> HomePage
where
    S: KeyValueStorage,
    N: Navigator,
{
    if !session.is_browser() {
        return HomePage::Blank;
    }

    if !session.is_authenticated() {
        session.navigator().push(LOGIN_PATH);
        return HomePage::Redirected;
    }

    let user = session.get_user().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring stored user");
        None
    });

    HomePage::Welcome {
        user,
        root: RootData::Loading,
    }
}

pub fn login_page<S, N>(session: &SessionStore<S, N>) -> LoginPage
where
    S: KeyValueStorage,
    N: Navigator,
{
    if !session.is_browser() {
        return LoginPage::Blank;
    }

    if session.is_authenticated() {
        session.navigator().push(HOME_PATH);
        return LoginPage::Redirected;
    }

    LoginPage::Form
}

/// Home page with its `GET /` panel
pub struct HomeScreen<A, S, N> {
    api: A,
    session: SessionStore<S, N>,
    view: watch::Sender<HomePage>,
}

impl<A, S, N> HomeScreen<A, S, N>
where
    A: RootApi,
    S: KeyValueStorage,
    N: Navigator,
{
    /// Run the home guard. A welcomed visitor starts out `Loading`.
    pub fn open(api: A, session: SessionStore<S, N>) -> Self {
        let (view, _) = watch::channel(home_page(&session));
        Self { api, session, view }
    }

    pub fn subscribe(&self) -> watch::Receiver<HomePage> {
        self.view.subscribe()
    }

    pub fn view(&self) -> HomePage {
        self.view.borrow().clone()
    }

    /// Fetch `GET /` if the panel is still loading; otherwise does nothing
    pub async fn load(&self) {
        let pending = matches!(
            *self.view.borrow(),
            HomePage::Welcome {
                root: RootData::Loading,
                ..
            }
        );
        if !pending {
            return;
        }

        let data = match self.api.fetch_root().await {
            Ok(response) => RootData::Loaded(response),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch API root");
                RootData::Error(e.to_string())
            }
        };

        self.view.send_modify(|view| {
            if let HomePage::Welcome { root, .. } = view {
                *root = data;
            }
        });
    }

    /// The page's logout button
    pub fn logout(&self) {
        self.session.logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::navigation::{Navigation, RecordingNavigator};
    use crate::session::{TOKEN_KEY, USER_KEY};
    use crate::storage::MemoryStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    type Reply = Result<RootResponse, FetchError>;

    /// Answers each root call with the next queued reply, once it is sent
    #[derive(Default)]
    struct GatedRootApi {
        replies: Mutex<Vec<oneshot::Receiver<Reply>>>,
        calls: AtomicUsize,
    }

    impl GatedRootApi {
        fn gate(&self) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.replies.lock().unwrap().push(rx);
            tx
        }
    }

    impl RootApi for Arc<GatedRootApi> {
        async fn fetch_root(&self) -> Result<RootResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.replies.lock().unwrap().remove(0);
            reply
                .await
                .unwrap_or_else(|_| Err(FetchError::Network("gate dropped".to_string())))
        }
    }

    type TestScreen = HomeScreen<Arc<GatedRootApi>, Arc<MemoryStorage>, Arc<RecordingNavigator>>;

    fn screen(logged_in: bool) -> (Arc<TestScreen>, Arc<GatedRootApi>, Arc<RecordingNavigator>) {
        let (session, _, navigator) = browser();
        if logged_in {
            session.save("a.b.c", &user()).unwrap();
        }
        let api = Arc::new(GatedRootApi::default());
        let screen = Arc::new(HomeScreen::open(Arc::clone(&api), session));
        (screen, api, navigator)
    }

    fn root_of(page: &HomePage) -> &RootData {
        match page {
            HomePage::Welcome { root, .. } => root,
            other => panic!("expected the welcome page, got {other:?}"),
        }
    }

    fn browser() -> (
        SessionStore<Arc<MemoryStorage>, Arc<RecordingNavigator>>,
        Arc<MemoryStorage>,
        Arc<RecordingNavigator>,
    ) {
        let storage = Arc::new(MemoryStorage::new());
        let navigator = Arc::new(RecordingNavigator::new());
        (
            SessionStore::new(Arc::clone(&storage), Arc::clone(&navigator)),
            storage,
            navigator,
        )
    }

    fn user() -> SessionUser {
        SessionUser {
            id: 1,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
        }
    }

    #[test]
    fn test_pages_blank_without_browser() {
        let navigator = Arc::new(RecordingNavigator::new());
        let session: SessionStore<MemoryStorage, _> =
            SessionStore::without_storage(Arc::clone(&navigator));

        assert_eq!(home_page(&session), HomePage::Blank);
        assert_eq!(login_page(&session), LoginPage::Blank);
        assert!(navigator.history().is_empty());
    }

    #[test]
    fn test_home_redirects_anonymous_visitor() {
        let (session, _, navigator) = browser();

        assert_eq!(home_page(&session), HomePage::Redirected);
        assert_eq!(
            navigator.history(),
            vec![Navigation::Push("/login".to_string())]
        );
    }

    #[test]
    fn test_home_welcomes_logged_in_user() {
        let (session, _, navigator) = browser();
        session.save("a.b.c", &user()).unwrap();

        let page = home_page(&session);
        assert_eq!(
            page,
            HomePage::Welcome {
                user: Some(user()),
                root: RootData::Loading,
            }
        );
        assert_eq!(
            page.welcome_line().as_deref(),
            Some("Welcome, Test User (test@example.com)")
        );
        assert!(navigator.history().is_empty());
    }

    #[test]
    fn test_home_treats_corrupt_user_as_none() {
        let (session, storage, _) = browser();
        storage.set(TOKEN_KEY, "a.b.c");
        storage.set(USER_KEY, "{not json");

        let page = home_page(&session);
        assert_eq!(
            page,
            HomePage::Welcome {
                user: None,
                root: RootData::Loading,
            }
        );
        assert_eq!(page.welcome_line(), None);
    }

    #[test]
    fn test_login_page_shows_form_to_anonymous_visitor() {
        let (session, _, navigator) = browser();

        assert_eq!(login_page(&session), LoginPage::Form);
        assert!(navigator.history().is_empty());
    }

    #[test]
    fn test_login_page_redirects_logged_in_user() {
        let (session, _, navigator) = browser();
        session.save("a.b.c", &user()).unwrap();

        assert_eq!(login_page(&session), LoginPage::Redirected);
        assert_eq!(navigator.history(), vec![Navigation::Push("/".to_string())]);
    }

    #[tokio::test]
    async fn test_home_screen_loads_root_response() {
        let (screen, api, _) = screen(true);
        let mut views = screen.subscribe();
        let tx = api.gate();

        let task = tokio::spawn({
            let screen = Arc::clone(&screen);
            async move { screen.load().await }
        });

        // Still loading until the call settles
        assert_eq!(root_of(&screen.view()), &RootData::Loading);
        assert_eq!(root_of(&screen.view()).render(), "Loading...");

        tx.send(Ok(RootResponse {
            message: "Hello from Origo API!".to_string(),
        }))
        .unwrap();
        task.await.unwrap();

        let page = views
            .wait_for(|page| matches!(page, HomePage::Welcome { root: RootData::Loaded(_), .. }))
            .await
            .unwrap()
            .clone();
        assert!(root_of(&page).render().contains("\"message\": \"Hello from Origo API!\""));
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_home_screen_shows_fetch_error() {
        let (screen, api, _) = screen(true);
        api.gate().send(Err(FetchError::Status(500))).unwrap();

        screen.load().await;

        let page = screen.view();
        assert_eq!(
            root_of(&page).render(),
            "Error: Request failed with status code 500"
        );
        assert!(page.welcome_line().is_some());
    }

    #[tokio::test]
    async fn test_home_screen_skips_fetch_when_redirected() {
        let (screen, api, navigator) = screen(false);

        screen.load().await;

        assert_eq!(screen.view(), HomePage::Redirected);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            navigator.history(),
            vec![Navigation::Push("/login".to_string())]
        );
    }

    #[tokio::test]
    async fn test_home_screen_loads_once() {
        let (screen, api, _) = screen(true);
        api.gate()
            .send(Ok(RootResponse {
                message: "Hello from Origo API!".to_string(),
            }))
            .unwrap();

        screen.load().await;
        screen.load().await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_home_screen_logout() {
        let (screen, _, navigator) = screen(true);

        screen.logout();

        assert_eq!(
            navigator.last(),
            Some(Navigation::Assign("/login".to_string()))
        );
    }
}
