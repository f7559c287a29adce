//! The rewrite pipeline, extracted from the CLI.
//!
//! `process` is I/O-agnostic: all reads and writes go through the port
//! traits, so the same code runs against disk and against an in-memory tree.

use crate::patch::render_file_patch;
use crate::ports::{SourceTree, WritePort};
use crate::settings::RewriteSettings;
use camino::{Utf8Path, Utf8PathBuf};
use lintfix_rules::{RuleError, RuleSet, builtin_rules};
use lintfix_types::summary::{FileChange, RunSummary};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Error type for pipeline setup. Per-file failures never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("build rules: {0}")]
    Rules(#[from] RuleError),
}

/// Outcome of one run.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub summary: RunSummary,
    /// Unified diff of every change; empty unless `collect_patch` is set.
    pub patch: String,
}

/// Build the built-in rules, apply the allow/deny selection and run them.
pub fn run_rewrite(
    settings: &RewriteSettings,
    tree: &dyn SourceTree,
    writer: &dyn WritePort,
) -> Result<RunOutcome, ToolError> {
    let rules = builtin_rules()?.select(&settings.allow, &settings.deny);
    debug!(rules = ?rules.keys(), "selected rules");
    Ok(process(settings, tree, writer, &rules))
}

/// Rewrite every matching file under the configured roots.
pub fn process(
    settings: &RewriteSettings,
    tree: &dyn SourceTree,
    writer: &dyn WritePort,
    rules: &RuleSet,
) -> RunOutcome {
    let mut outcome = RunOutcome::default();
    let mut seen: BTreeSet<Utf8PathBuf> = BTreeSet::new();

    for root in &settings.roots {
        if !tree.is_dir(root) {
            debug!(root = %root, "root not found, skipping");
            continue;
        }

        for path in tree.walk_files(root, &settings.exclude) {
            let matches = path
                .file_name()
                .is_some_and(|name| settings.matches_extension(name));
            if !matches || !seen.insert(path.clone()) {
                continue;
            }
            process_file(settings, tree, writer, rules, &path, &mut outcome);
        }
    }

    let summary = &outcome.summary;
    info!(
        scanned = summary.files_scanned,
        modified = summary.files_modified,
        failed = summary.files_failed,
        dry_run = settings.dry_run,
        "rewrite finished"
    );
    outcome
}

fn process_file(
    settings: &RewriteSettings,
    tree: &dyn SourceTree,
    writer: &dyn WritePort,
    rules: &RuleSet,
    path: &Utf8Path,
    outcome: &mut RunOutcome,
) {
    outcome.summary.record_scanned();

    let original = match tree.read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            skip_file(&mut outcome.summary, path, &err);
            return;
        }
    };

    let rewrite = rules.apply(&original);
    if rewrite.content == original {
        return;
    }

    if !settings.dry_run
        && let Err(err) = writer.write_file(path, &rewrite.content)
    {
        skip_file(&mut outcome.summary, path, &err);
        return;
    }

    if settings.collect_patch {
        outcome
            .patch
            .push_str(&render_file_patch(path, &original, &rewrite.content));
    }
    outcome.summary.record_modified(FileChange {
        path: path.to_path_buf(),
        rules: rewrite.hits.iter().map(|k| k.to_string()).collect(),
    });
}

fn skip_file(summary: &mut RunSummary, path: &Utf8Path, err: &anyhow::Error) {
    let message = format!("{err:#}");
    warn!(path = %path, error = %message, "skipping file");
    summary.record_failed(path, message);
}
