//! Outbound adapters implementing domain ports.

pub mod baas;
pub mod directory;
pub mod storage;
