//! Account data held by the form and the signed-in session.

use std::fmt;

use zeroize::Zeroizing;

use super::auth::{LoginCredentials, LoginValidationError};

/// Mutable username/password pair owned by one sign-in form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct User {
    username: String,
    password: Zeroizing<String>,
}

impl User {
    /// Build a user with both fields filled in.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Current username field.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Current password field.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Replace the username field.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// Replace the password field.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Zeroizing::new(password.into());
    }

    /// Validate the fields into credentials.
    pub fn credentials(&self) -> Result<LoginCredentials, LoginValidationError> {
        LoginCredentials::try_from_parts(&self.username, &self.password)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account signed in with the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct ActiveUser {
    username: String,
    session_token: Zeroizing<String>,
}

impl ActiveUser {
    /// Record a signed-in account and its session token.
    pub fn new(username: impl Into<String>, session_token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            session_token: Zeroizing::new(session_token.into()),
        }
    }

    /// Username reported by the backend.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Opaque token authorising session calls such as logout.
    pub fn session_token(&self) -> &str {
        self.session_token.as_str()
    }
}

impl fmt::Debug for ActiveUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveUser")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
