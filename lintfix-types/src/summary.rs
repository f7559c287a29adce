use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Aggregate outcome of one rewrite run.
///
/// Accumulated in traversal order; `modified` and `errors` keep the order in
/// which files were visited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Files whose extension matched and whose contents were read (or attempted).
    pub files_scanned: u64,

    /// Files whose final content differed from the original.
    pub files_modified: u64,

    /// Files skipped because of a read or write failure.
    #[serde(default)]
    pub files_failed: u64,

    #[serde(default)]
    pub modified: Vec<FileChange>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FileError>,
}

impl RunSummary {
    pub fn record_scanned(&mut self) {
        self.files_scanned += 1;
    }

    pub fn record_modified(&mut self, change: FileChange) {
        self.files_modified += 1;
        self.modified.push(change);
    }

    pub fn record_failed(&mut self, path: &Utf8Path, message: impl Into<String>) {
        self.files_failed += 1;
        self.errors.push(FileError {
            path: path.to_path_buf(),
            message: message.into(),
        });
    }

    pub fn modified_paths(&self) -> impl Iterator<Item = &Utf8Path> {
        self.modified.iter().map(|c| c.path.as_path())
    }
}

/// A file that was (or, in dry-run mode, would be) rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Path relative to the project root.
    pub path: Utf8PathBuf,

    /// Keys of the rules that changed this file, in application order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    pub path: Utf8PathBuf,
    pub message: String,
}
