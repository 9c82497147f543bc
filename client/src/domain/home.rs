//! Landing screen state shown after sign-in.

use child_directory::SupportedChild;

use crate::domain::ActiveUser;
use crate::domain::ports::ChildDirectory;

/// Welcome message and the directory listing for the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    greeting: String,
    children: Vec<SupportedChild>,
}

impl HomeView {
    /// Build the home screen for the signed-in account, or for a guest.
    pub fn new(active_user: Option<&ActiveUser>, directory: &dyn ChildDirectory) -> Self {
        let greeting = match active_user {
            Some(user) => format!("Welcome, {}!", user.username()),
            None => "Welcome!".to_owned(),
        };
        Self {
            greeting,
            children: directory.supported_children(),
        }
    }

    /// Welcome line.
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Supported children to list below the greeting.
    pub fn children(&self) -> &[SupportedChild] {
        &self.children
    }
}
