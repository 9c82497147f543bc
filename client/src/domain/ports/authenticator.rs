//! Driving port for sign-in and sign-up use-cases.
//!
//! The form calls this port without knowing which backend sits behind it,
//! which lets form tests substitute a double instead of a network client.

use async_trait::async_trait;

use super::AuthError;
use crate::domain::LoginCredentials;

/// Use-case port the sign-in form submits to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Sign in with the given credentials.
    async fn login(&self, credentials: &LoginCredentials) -> Result<(), AuthError>;

    /// Create an account with the given credentials.
    async fn register(&self, credentials: &LoginCredentials) -> Result<(), AuthError>;
}
