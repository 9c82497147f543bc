//! Domain ports and supporting types for the hexagonal boundary.

mod auth_backend;
mod authenticator;
mod child_directory;
mod device_storage;
mod navigator;

#[cfg(test)]
pub use auth_backend::MockAuthBackend;
pub use auth_backend::{AuthBackend, AuthError, FixtureAuthBackend};
#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::Authenticator;
#[cfg(test)]
pub use child_directory::MockChildDirectory;
pub use child_directory::ChildDirectory;
#[cfg(test)]
pub use device_storage::MockDeviceStorage;
pub use device_storage::{DeviceStorage, PASSWORD_KEY, StorageError, USERNAME_KEY};
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::{Navigator, Route};
