//! Driven port for the supported-child directory.

use child_directory::SupportedChild;

/// Read-only source of supported-child records.
#[cfg_attr(test, mockall::automock)]
pub trait ChildDirectory: Send + Sync {
    /// All records, in directory order.
    fn supported_children(&self) -> Vec<SupportedChild>;
}
