//! Rewrite rules: turn one file's text into its lint-clean text.
//!
//! This crate owns *what* gets rewritten. It never touches storage; walking
//! the tree and writing files back is the `lintfix-core` crate's job.
//!
//! Rules are total functions over text. A rule whose pattern does not match
//! returns its input borrowed and unchanged.

mod apostrophe;
mod catalog;
mod error;
mod import;
pub mod markup;
mod retag;
mod rule;
mod select;
mod substitution;

pub use apostrophe::EscapeApostrophes;
pub use catalog::{DEFAULT_EXTENSIONS, DEFAULT_ROOTS, LINK_IMPORT_LINE, builtin_rules};
pub use error::RuleError;
pub use import::{Anchor, InsertImport, first_anchor};
pub use retag::RetagLinks;
pub use rule::{Rewrite, Rule, RuleKind, RuleMeta, RuleSet};
pub use select::glob_match;
pub use substitution::{Pattern, Substitution};
