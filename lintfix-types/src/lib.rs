//! Shared DTOs for the lintfix workspace.
//!
//! # Design constraints
//! - These types are printed as JSON with `--format json`.
//! - Prefer adding optional fields over changing semantics.

pub mod report;
pub mod summary;

/// Schema identifiers.
pub mod schema {
    pub const LINTFIX_RUN_V1: &str = "lintfix.run.v1";
}
