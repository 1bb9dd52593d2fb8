//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Access to the build workspace.
///
/// Extractors never touch `std::fs` directly so that every strategy can be
/// exercised against [`super::MockFileSystem`].
pub trait FileSystem: Send + Sync {
    /// Read file contents as UTF-8 text
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Read raw file contents
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// List regular files below `root`.
    ///
    /// `max_depth` counts path components below `root`: `Some(1)` lists only the
    /// direct children, `None` walks the whole tree.
    fn walk_files(&self, root: &Path, max_depth: Option<usize>) -> Result<Vec<PathBuf>>;
}
