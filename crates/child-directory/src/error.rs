//! Error types for the child-directory crate.

use thiserror::Error;

/// Errors raised while decoding a child registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The registry JSON is malformed or missing required fields.
    #[error("invalid child registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported child registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// Two records share the same identifier.
    #[error("duplicate child id {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: u32,
    },

    /// A record has a blank first or last name.
    #[error("child {id} has a blank name")]
    BlankName {
        /// Identifier of the offending record.
        id: u32,
    },

    /// A record carries an impossible date of birth.
    #[error("child {id} has an invalid date of birth ({day}/{month})")]
    InvalidDateOfBirth {
        /// Identifier of the offending record.
        id: u32,
        /// Day value found.
        day: u8,
        /// Month value found.
        month: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_id_formats_correctly() {
        let err = DirectoryError::DuplicateId { id: 3 };
        assert_eq!(err.to_string(), "duplicate child id 3");
    }

    #[test]
    fn unsupported_version_formats_correctly() {
        let err = DirectoryError::UnsupportedVersion {
            expected: 1,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "unsupported child registry version: expected 1, found 4"
        );
    }
}
