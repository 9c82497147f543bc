//! Driven port for client-side routing.

use std::fmt;

/// Screens the client can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The sign-in form.
    Login,
    /// The landing screen shown after sign-in.
    Home,
}

impl Route {
    /// Router path for the screen.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Home => "/home",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Port for moving the UI to another screen.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Show the given screen.
    fn navigate(&self, route: Route);
}
