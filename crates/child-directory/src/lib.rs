//! Static supported-child records for the sponsorship directory.
//!
//! The records are seed data shipped with the client. They are parsed from
//! an embedded JSON registry and never mutated. The crate is independent of
//! the client domain so list views and tests can depend on it directly.
//!
//! # Example
//!
//! ```
//! use child_directory::supported_children;
//!
//! let children = supported_children();
//! assert_eq!(children.len(), 5);
//! assert_eq!(children[0].first_name, "Amani");
//! ```

mod child;
mod error;
mod registry;

pub use child::{DateOfBirth, Gender, Schooling, SupportedChild};
pub use error::DirectoryError;
pub use registry::{ChildRegistry, supported_children};
