//! Sponsorship client library modules.
//!
//! The domain owns the sign-in form state machine and the authentication
//! service. Outbound adapters talk to the backend-as-a-service user API and
//! to device storage; the CLI is the inbound adapter.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use config::ClientSettings;
