//! Domain primitives, ports, and services.
//!
//! Purpose: keep sign-in behaviour independent of transport and UI. The form
//! and the authentication service only see ports; adapters live under
//! `outbound` and `inbound`.
//!
//! Public surface:
//! - User / ActiveUser — form-owned account fields and the signed-in account.
//! - LoginCredentials — validated username/password pair.
//! - AuthenticationService — logout-then-act wrapper over an `AuthBackend`.
//! - SignInForm — login/sign-up mode and validation state machine.
//! - HomeView — welcome state shown after sign-in.

pub mod auth;
pub mod auth_service;
pub mod home;
pub mod ports;
pub mod sign_in_form;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::auth_service::AuthenticationService;
pub use self::home::HomeView;
pub use self::ports::{AuthError, Route};
pub use self::sign_in_form::{FormMode, SignInForm, SubmitOutcome};
pub use self::user::{ActiveUser, User};
