//! Static supported-child directory adapter.

use child_directory::{SupportedChild, supported_children};

use crate::domain::ports::ChildDirectory;

/// Directory backed by the records bundled with `child-directory`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticChildDirectory;

impl ChildDirectory for StaticChildDirectory {
    fn supported_children(&self) -> Vec<SupportedChild> {
        supported_children()
    }
}
