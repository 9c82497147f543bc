//! Sign-in / sign-up form state machine.
//!
//! The form owns one [`User`] and a [`FormMode`]. Submitting validates the
//! fields, dispatches to the [`Authenticator`] at most once, and returns a
//! [`SubmitOutcome`] carrying the alert text the UI should show. Navigation
//! and credential remembering go through injected ports.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{
    AuthError, Authenticator, DeviceStorage, Navigator, PASSWORD_KEY, Route, StorageError,
    USERNAME_KEY,
};
use crate::domain::{LoginCredentials, LoginValidationError, User};

/// Which action the form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Sign in to an existing account.
    #[default]
    LoggingIn,
    /// Create a new account.
    SigningUp,
}

impl FormMode {
    fn toggled(self) -> Self {
        match self {
            Self::LoggingIn => Self::SigningUp,
            Self::SigningUp => Self::LoggingIn,
        }
    }
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the authenticator was not called.
    Invalid(LoginValidationError),
    /// Signed in and navigated to the home screen.
    LoggedIn,
    /// Sign-in was rejected.
    LoginFailed {
        /// Username the attempt used.
        username: String,
        /// Backend failure.
        error: AuthError,
    },
    /// Account created; the form is back in login mode.
    Registered,
    /// Account creation was rejected.
    RegistrationFailed {
        /// Backend failure.
        error: AuthError,
    },
}

impl SubmitOutcome {
    /// Alert text to show, if the outcome has one.
    pub fn alert(&self) -> Option<String> {
        match self {
            Self::Invalid(error) => Some(error.alert().to_owned()),
            Self::LoggedIn => None,
            Self::LoginFailed { username, error } => Some(login_failure_alert(username, error)),
            Self::Registered => Some("Your account was successfully created.".to_owned()),
            Self::RegistrationFailed { error } => Some(registration_failure_alert(error)),
        }
    }

    /// Whether the backend accepted the submission.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::LoggedIn | Self::Registered)
    }
}

fn login_failure_alert(username: &str, error: &AuthError) -> String {
    match error {
        AuthError::InvalidCredentials => {
            format!("Unfortunately we could not find your account: {username}")
        }
        AuthError::Network { .. } => format!(
            "Unfortunately we could not sign in {username}: the service is unreachable."
        ),
        AuthError::DuplicateAccount | AuthError::Unknown { .. } => {
            format!("Unfortunately we could not sign in {username}.")
        }
    }
}

fn registration_failure_alert(error: &AuthError) -> String {
    match error {
        AuthError::DuplicateAccount => {
            "Unfortunately that username is already taken.".to_owned()
        }
        AuthError::Network { .. } => {
            "Unfortunately we were unable to create your account: the service is unreachable."
                .to_owned()
        }
        AuthError::InvalidCredentials | AuthError::Unknown { .. } => {
            "Unfortunately we were unable to create your account.".to_owned()
        }
    }
}

/// Form component driving sign-in and sign-up.
pub struct SignInForm {
    user: User,
    mode: FormMode,
    authenticator: Arc<dyn Authenticator>,
    navigator: Arc<dyn Navigator>,
    storage: Option<Arc<dyn DeviceStorage>>,
}

impl SignInForm {
    /// Create an empty form in login mode.
    pub fn new(authenticator: Arc<dyn Authenticator>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            user: User::default(),
            mode: FormMode::default(),
            authenticator,
            navigator,
            storage: None,
        }
    }

    /// Remember credentials in `storage` after successful submissions and
    /// fill the form from previously remembered values.
    pub fn with_credential_memory(mut self, storage: Arc<dyn DeviceStorage>) -> Self {
        match load_remembered(storage.as_ref()) {
            Ok(Some(user)) => {
                debug!(username = user.username(), "filled form from device storage");
                self.user = user;
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "could not read remembered credentials"),
        }
        self.storage = Some(storage);
        self
    }

    /// Current mode.
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Whether the form submits a sign-in.
    pub fn is_logging_in(&self) -> bool {
        self.mode == FormMode::LoggingIn
    }

    /// Switch between login and sign-up.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        debug!(mode = ?self.mode, "form mode toggled");
    }

    /// Fields as currently entered.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Replace the username field.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.user.set_username(username);
    }

    /// Replace the password field.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.user.set_password(password);
    }

    /// Validate the fields and submit them for the current mode.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let credentials = match self.user.credentials() {
            Ok(credentials) => credentials,
            Err(error) => {
                debug!(%error, "form rejected before submission");
                return SubmitOutcome::Invalid(error);
            }
        };

        match self.mode {
            FormMode::LoggingIn => self.login(credentials).await,
            FormMode::SigningUp => self.register(credentials).await,
        }
    }

    async fn login(&mut self, credentials: LoginCredentials) -> SubmitOutcome {
        match self.authenticator.login(&credentials).await {
            Ok(()) => {
                self.remember(&credentials);
                self.navigator.navigate(Route::Home);
                SubmitOutcome::LoggedIn
            }
            Err(error) => SubmitOutcome::LoginFailed {
                username: credentials.username().to_owned(),
                error,
            },
        }
    }

    async fn register(&mut self, credentials: LoginCredentials) -> SubmitOutcome {
        match self.authenticator.register(&credentials).await {
            Ok(()) => {
                self.remember(&credentials);
                self.mode = FormMode::LoggingIn;
                SubmitOutcome::Registered
            }
            Err(error) => SubmitOutcome::RegistrationFailed { error },
        }
    }

    fn remember(&self, credentials: &LoginCredentials) {
        let Some(storage) = self.storage.as_deref() else {
            return;
        };
        if let Err(err) = store_credentials(storage, credentials) {
            warn!(error = %err, "could not remember credentials");
        }
    }
}

fn load_remembered(storage: &dyn DeviceStorage) -> Result<Option<User>, StorageError> {
    let username = storage.get_string(USERNAME_KEY)?;
    let password = storage.get_string(PASSWORD_KEY)?;
    Ok(match (username, password) {
        (None, None) => None,
        (username, password) => Some(User::new(
            username.unwrap_or_default(),
            password.unwrap_or_default(),
        )),
    })
}

fn store_credentials(
    storage: &dyn DeviceStorage,
    credentials: &LoginCredentials,
) -> Result<(), StorageError> {
    storage.set_strings(&[
        (USERNAME_KEY, credentials.username()),
        (PASSWORD_KEY, credentials.password()),
    ])
}
