//! Embeddable core library for lintfix.
//!
//! Provides a clap-free, I/O-abstracted entry point: the CLI is one host,
//! tests are another.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`SourceTree`](ports::SourceTree): enumerate and read source files
//! - [`WritePort`](ports::WritePort): overwrite a file in place
//!
//! The [`adapters`] module provides a filesystem-backed implementation and an
//! in-memory one for tests.
//!
//! # Entry points
//!
//! - [`process`](pipeline::process): rewrite a tree with a given rule set
//! - [`run_rewrite`](pipeline::run_rewrite): build the built-in rules from settings, then `process`

pub mod adapters;
mod patch;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use patch::render_file_patch;

// Re-export so embedders don't need lintfix-rules / lintfix-types directly.
pub use lintfix_rules::{RuleError, RuleSet};
pub use lintfix_types::summary::{FileChange, FileError, RunSummary};
