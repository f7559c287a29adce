//! Port traits abstracting all I/O away from the pipeline.
//!
//! Paths passed across these traits are relative to the tree's root.

use camino::{Utf8Path, Utf8PathBuf};

/// Read-only access to a source tree.
pub trait SourceTree {
    /// Project root; reported paths are relative to it.
    fn root(&self) -> &Utf8Path;

    fn is_dir(&self, rel: &Utf8Path) -> bool;

    /// Every regular file below `dir`, depth-first and sorted by name.
    ///
    /// Directories whose name matches one of the `exclude` patterns are not
    /// entered. Entries that cannot be visited are logged and skipped.
    fn walk_files(&self, dir: &Utf8Path, exclude: &[String]) -> Vec<Utf8PathBuf>;

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String>;
}

/// In-place file overwrite.
pub trait WritePort {
    fn write_file(&self, rel: &Utf8Path, contents: &str) -> anyhow::Result<()>;
}
