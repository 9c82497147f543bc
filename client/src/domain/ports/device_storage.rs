//! Driven port for device key-value storage.
//!
//! Remembered credentials are stored under [`USERNAME_KEY`] and
//! [`PASSWORD_KEY`] so the next form can be filled in automatically.

use thiserror::Error;

/// Storage key holding the last signed-in username.
pub const USERNAME_KEY: &str = "username";
/// Storage key holding the last signed-in password.
pub const PASSWORD_KEY: &str = "password";

/// Errors raised by device storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("device storage i/o failed: {message}")]
    Io {
        /// Description of the I/O failure.
        message: String,
    },
    /// Stored contents could not be decoded.
    #[error("device storage decode failed: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },
    /// Values could not be encoded for writing.
    #[error("device storage encode failed: {message}")]
    Encode {
        /// Description of the encode failure.
        message: String,
    },
}

impl StorageError {
    /// Convenience constructor for [`StorageError::Io`].
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`StorageError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`StorageError::Encode`].
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }
}

/// String key-value store local to the device.
#[cfg_attr(test, mockall::automock)]
pub trait DeviceStorage: Send + Sync {
    /// Read the value stored under `key`.
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_string(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Store every `(key, value)` pair in one update. Either all pairs are
    /// written or none are.
    fn set_strings<'a>(&self, entries: &[(&'a str, &'a str)]) -> Result<(), StorageError>;
}
