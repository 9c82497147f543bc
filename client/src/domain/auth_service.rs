//! Authentication service over an [`AuthBackend`].
//!
//! Every sign-in and sign-up first ends whatever session the backend holds,
//! then makes a single attempt. Failures at either step are logged and
//! returned unchanged; there is no retry.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{AuthBackend, AuthError, Authenticator};
use crate::domain::{ActiveUser, LoginCredentials};

/// Service implementing the [`Authenticator`] driving port.
#[derive(Clone)]
pub struct AuthenticationService<B> {
    backend: Arc<B>,
}

impl<B> AuthenticationService<B> {
    /// Create a service backed by the given adapter.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }
}

impl<B> AuthenticationService<B>
where
    B: AuthBackend,
{
    /// The account currently signed in, if any.
    pub fn active_user(&self) -> Option<ActiveUser> {
        self.backend.active_user()
    }

    /// End the active session.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.backend
            .logout()
            .await
            .map_err(|err| log_failure("logout", None, err))
    }

    async fn reset_session(&self, operation: &'static str, username: &str) -> Result<(), AuthError> {
        self.backend
            .logout()
            .await
            .map_err(|err| log_failure(operation, Some(username), err))
    }
}

fn log_failure(operation: &'static str, username: Option<&str>, err: AuthError) -> AuthError {
    error!(
        operation,
        username,
        kind = err.kind(),
        error = %err,
        "authentication request failed"
    );
    err
}

#[async_trait]
impl<B> Authenticator for AuthenticationService<B>
where
    B: AuthBackend,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<(), AuthError> {
        self.reset_session("login", credentials.username()).await?;
        let active = self
            .backend
            .login(credentials)
            .await
            .map_err(|err| log_failure("login", Some(credentials.username()), err))?;
        debug!(username = active.username(), "signed in");
        Ok(())
    }

    async fn register(&self, credentials: &LoginCredentials) -> Result<(), AuthError> {
        self.reset_session("register", credentials.username()).await?;
        let active = self
            .backend
            .signup(credentials)
            .await
            .map_err(|err| log_failure("register", Some(credentials.username()), err))?;
        debug!(username = active.username(), "account created");
        Ok(())
    }
}
