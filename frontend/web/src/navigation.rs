//! Navigation
//!
//! Two kinds of route change: a full page load ([`Navigator::assign`]) that
//! drops all in-memory client state, and an in-app push
//! ([`Navigator::push`]) that keeps it.

use std::sync::{Arc, Mutex, PoisonError};

pub trait Navigator {
    /// Full page transition
    fn assign(&self, path: &str);

    /// Client-side route change
    fn push(&self, path: &str);
}

impl<N> Navigator for Arc<N>
where
    N: Navigator + ?Sized,
{
    fn assign(&self, path: &str) {
        (**self).assign(path)
    }

    fn push(&self, path: &str) {
        (**self).push(path)
    }
}

/// A recorded navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Assign(String),
    Push(String),
}

/// Navigator that only records what was requested
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn record(&self, navigation: Navigation) {
        tracing::debug!(?navigation, "Navigating");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(navigation);
    }
}

impl Navigator for RecordingNavigator {
    fn assign(&self, path: &str) {
        self.record(Navigation::Assign(path.to_string()));
    }

    fn push(&self, path: &str) {
        self.record(Navigation::Push(path.to_string()));
    }
}
