//! Navigator adapter for terminal sessions.

use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::domain::ports::{Navigator, Route};

/// Records the last requested screen so the CLI can render it.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    current: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    /// Screen most recently navigated to.
    pub fn current(&self) -> Option<Route> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        info!(path = route.path(), "navigating");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}
