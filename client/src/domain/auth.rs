//! Login credentials and the form's field validation.
//!
//! Validation runs before any backend call. The checks are ordered so a
//! missing username with a password present is reported first, then a
//! missing password, then both fields missing.

use std::fmt;

use zeroize::Zeroizing;

/// Validation failure for a sign-in or sign-up attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was empty; a password was given.
    EmptyUsername,
    /// Password was empty; a username was given.
    EmptyPassword,
    /// Neither field was filled in.
    EmptyUsernameAndPassword,
}

impl LoginValidationError {
    /// Alert text shown to the person filling in the form.
    pub fn alert(self) -> &'static str {
        match self {
            Self::EmptyUsername => "Please Provide Username",
            Self::EmptyPassword => "Please Provide Password",
            Self::EmptyUsernameAndPassword => "Please Provide Both a Username and a Password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyUsernameAndPassword => {
                write!(f, "username and password must not be empty")
            }
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated credentials passed to authentication ports.
///
/// ## Invariants
/// - `username` and `password` are non-empty.
/// - Both keep caller-provided whitespace; a field of spaces counts as
///   filled in.
///
/// # Examples
/// ```
/// use client::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("bob", "pw").unwrap();
/// assert_eq!(creds.username(), "bob");
/// assert_eq!(creds.password(), "pw");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        match (username.is_empty(), password.is_empty()) {
            (true, false) => Err(LoginValidationError::EmptyUsername),
            (false, true) => Err(LoginValidationError::EmptyPassword),
            (true, true) => Err(LoginValidationError::EmptyUsernameAndPassword),
            (false, false) => Ok(Self {
                username: username.to_owned(),
                password: Zeroizing::new(password.to_owned()),
            }),
        }
    }

    /// Username sent to the backend.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password sent to the backend.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
