//! Driven port for the backend-as-a-service user API.
//!
//! The port mirrors the SDK user object: logout, login, sign-up, and the
//! active session. Adapters translate transport failures into [`AuthError`]
//! so callers can give specific feedback.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{ActiveUser, LoginCredentials};

/// Failure reported by an authentication backend.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AuthError {
    /// The backend could not be reached or did not answer in time.
    #[error("authentication backend unreachable: {message}")]
    Network {
        /// Transport-level description.
        message: String,
    },
    /// Username or password was rejected.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Sign-up used a username that already exists.
    #[error("account already exists")]
    DuplicateAccount,
    /// Any other backend failure.
    #[error("authentication failed: {detail}")]
    Unknown {
        /// Backend-provided description.
        detail: String,
    },
}

impl AuthError {
    /// Convenience constructor for [`AuthError::Network`].
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`AuthError::Unknown`].
    pub fn unknown(detail: impl Into<String>) -> Self {
        Self::Unknown {
            detail: detail.into(),
        }
    }

    /// Stable tag matching the serialised `kind` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::InvalidCredentials => "invalidCredentials",
            Self::DuplicateAccount => "duplicateAccount",
            Self::Unknown { .. } => "unknown",
        }
    }
}

/// Port wrapping the backend SDK's user object.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// End the active session. Succeeds when no session exists.
    async fn logout(&self) -> Result<(), AuthError>;

    /// Sign in and make the account the active user.
    async fn login(&self, credentials: &LoginCredentials) -> Result<ActiveUser, AuthError>;

    /// Create an account and make it the active user.
    async fn signup(&self, credentials: &LoginCredentials) -> Result<ActiveUser, AuthError>;

    /// The active user, if a session exists.
    fn active_user(&self) -> Option<ActiveUser>;
}

#[derive(Debug, Default)]
struct FixtureState {
    accounts: HashMap<String, String>,
    active: Option<ActiveUser>,
    issued_tokens: u64,
}

/// In-memory backend used for offline runs and tests.
///
/// Accounts live for the lifetime of the value. Session tokens are
/// sequential so runs stay deterministic.
#[derive(Debug, Default)]
pub struct FixtureAuthBackend {
    state: Mutex<FixtureState>,
}

impl FixtureAuthBackend {
    /// Build a backend that already knows the given accounts.
    pub fn with_accounts<I, U, P>(accounts: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        let accounts = accounts
            .into_iter()
            .map(|(username, password)| (username.into(), password.into()))
            .collect();
        Self {
            state: Mutex::new(FixtureState {
                accounts,
                ..FixtureState::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, FixtureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn open_session(state: &mut FixtureState, username: &str) -> ActiveUser {
        state.issued_tokens += 1;
        let active = ActiveUser::new(username, format!("fixture-token-{}", state.issued_tokens));
        state.active = Some(active.clone());
        active
    }
}

#[async_trait]
impl AuthBackend for FixtureAuthBackend {
    async fn logout(&self) -> Result<(), AuthError> {
        self.state().active = None;
        Ok(())
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<ActiveUser, AuthError> {
        let mut state = self.state();
        match state.accounts.get(credentials.username()) {
            Some(password) if password == credentials.password() => {
                Ok(Self::open_session(&mut state, credentials.username()))
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn signup(&self, credentials: &LoginCredentials) -> Result<ActiveUser, AuthError> {
        let mut state = self.state();
        if state.accounts.contains_key(credentials.username()) {
            return Err(AuthError::DuplicateAccount);
        }
        state.accounts.insert(
            credentials.username().to_owned(),
            credentials.password().to_owned(),
        );
        Ok(Self::open_session(&mut state, credentials.username()))
    }

    fn active_user(&self) -> Option<ActiveUser> {
        self.state().active.clone()
    }
}
