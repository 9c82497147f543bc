//! Backend-as-a-service user API adapter.

mod dto;
mod http_backend;

pub use http_backend::{BaasHttpBackend, BaasHttpConfig, BaasSetupError};
