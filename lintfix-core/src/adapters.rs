//! Default port implementations.

use crate::ports::{SourceTree, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use lintfix_rules::glob_match;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};
use walkdir::WalkDir;

fn is_excluded(name: &str, exclude: &[String]) -> bool {
    exclude.iter().any(|p| glob_match(p, name))
}

/// File-system backed tree rooted at a project directory.
#[derive(Debug, Clone)]
pub struct FsSourceTree {
    root: Utf8PathBuf,
}

impl FsSourceTree {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    fn abs(&self, rel: &Utf8Path) -> Utf8PathBuf {
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.root.join(rel)
        }
    }

    fn relative(&self, path: Utf8PathBuf) -> Utf8PathBuf {
        match path.strip_prefix(&self.root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => path,
        }
    }
}

impl SourceTree for FsSourceTree {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn is_dir(&self, rel: &Utf8Path) -> bool {
        self.abs(rel).is_dir()
    }

    fn walk_files(&self, dir: &Utf8Path, exclude: &[String]) -> Vec<Utf8PathBuf> {
        let walker = WalkDir::new(self.abs(dir))
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                if is_excluded(&name, exclude) {
                    debug!(dir = %e.path().display(), "excluded directory");
                    return false;
                }
                true
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match Utf8PathBuf::from_path_buf(entry.into_path()) {
                Ok(path) => files.push(self.relative(path)),
                Err(path) => warn!(path = %path.display(), "skipping non UTF-8 path"),
            }
        }
        files
    }

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
        let abs = self.abs(rel);
        fs::read_to_string(&abs).with_context(|| format!("read {}", abs))
    }
}

impl WritePort for FsSourceTree {
    fn write_file(&self, rel: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        let abs = self.abs(rel);
        fs::write(&abs, contents).with_context(|| format!("write {}", abs))
    }
}

/// In-memory tree for embedding and testing.
///
/// Paths are kept in a `BTreeMap`, whose component-wise ordering matches the
/// name-sorted depth-first order of [`FsSourceTree`]. Individual paths can be
/// marked as failing to read or write.
#[derive(Debug, Default)]
pub struct InMemorySourceTree {
    root: Utf8PathBuf,
    files: RefCell<BTreeMap<Utf8PathBuf, String>>,
    unreadable: BTreeSet<Utf8PathBuf>,
    unwritable: BTreeSet<Utf8PathBuf>,
    writes: RefCell<Vec<Utf8PathBuf>>,
}

impl InMemorySourceTree {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_file(self, rel: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(rel.into(), contents.into());
        self
    }

    pub fn fail_read(mut self, rel: impl Into<Utf8PathBuf>) -> Self {
        self.unreadable.insert(rel.into());
        self
    }

    pub fn fail_write(mut self, rel: impl Into<Utf8PathBuf>) -> Self {
        self.unwritable.insert(rel.into());
        self
    }

    pub fn get(&self, rel: impl AsRef<Utf8Path>) -> Option<String> {
        self.files.borrow().get(rel.as_ref()).cloned()
    }

    /// Paths written so far, in write order.
    pub fn writes(&self) -> Vec<Utf8PathBuf> {
        self.writes.borrow().clone()
    }
}

impl SourceTree for InMemorySourceTree {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn is_dir(&self, rel: &Utf8Path) -> bool {
        self.files
            .borrow()
            .keys()
            .any(|p| p.as_path() != rel && p.starts_with(rel))
    }

    fn walk_files(&self, dir: &Utf8Path, exclude: &[String]) -> Vec<Utf8PathBuf> {
        self.files
            .borrow()
            .keys()
            .filter(|p| p.as_path() != dir)
            .filter_map(|p| {
                let below = p.strip_prefix(dir).ok()?;
                let parents: Vec<&str> = below.parent()?.iter().collect();
                if parents.iter().any(|name| is_excluded(name, exclude)) {
                    return None;
                }
                Some(p.clone())
            })
            .collect()
    }

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
        if self.unreadable.contains(rel) {
            anyhow::bail!("read {}: permission denied", rel);
        }
        self.files
            .borrow()
            .get(rel)
            .cloned()
            .with_context(|| format!("read {}: no such file", rel))
    }
}

impl WritePort for InMemorySourceTree {
    fn write_file(&self, rel: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        if self.unwritable.contains(rel) {
            anyhow::bail!("write {}: read-only file system", rel);
        }
        self.files
            .borrow_mut()
            .insert(rel.to_path_buf(), contents.to_string());
        self.writes.borrow_mut().push(rel.to_path_buf());
        Ok(())
    }
}
