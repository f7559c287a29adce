//! Clap-free settings for the rewrite pipeline.

use camino::Utf8PathBuf;
use lintfix_rules::{DEFAULT_EXTENSIONS, DEFAULT_ROOTS};

/// Settings for one rewrite run.
#[derive(Debug, Clone)]
pub struct RewriteSettings {
    /// Directories to walk, relative to the project root, in order.
    pub roots: Vec<Utf8PathBuf>,
    /// File-name suffixes to rewrite (e.g. `.tsx`).
    pub extensions: Vec<String>,
    /// Directory-name patterns that are never entered.
    pub exclude: Vec<String>,

    // Rule selection
    pub allow: Vec<String>,
    pub deny: Vec<String>,

    // Output
    pub dry_run: bool,
    pub collect_patch: bool,
}

impl Default for RewriteSettings {
    fn default() -> Self {
        Self {
            roots: DEFAULT_ROOTS.iter().map(Utf8PathBuf::from).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude: Vec::new(),
            allow: Vec::new(),
            deny: Vec::new(),
            dry_run: false,
            collect_patch: false,
        }
    }
}

impl RewriteSettings {
    /// True when the file name ends in one of the configured suffixes.
    pub fn matches_extension(&self, file_name: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| !ext.is_empty() && file_name.ends_with(ext.as_str()))
    }
}
