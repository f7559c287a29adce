//! Configuration file loading for lintfix.
//!
//! Discovers and loads `lintfix.toml` from the project root and merges it
//! with CLI arguments. Anything the file leaves out keeps the built-in
//! default.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use lintfix_core::settings::RewriteSettings;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "lintfix.toml";

/// Top-level configuration from lintfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LintfixConfig {
    /// Directories to walk, relative to the project root.
    pub roots: Option<Vec<Utf8PathBuf>>,

    /// File-name suffixes to rewrite.
    pub extensions: Option<Vec<String>>,

    /// Directory names never entered during the walk.
    pub exclude: Vec<String>,

    pub rules: RulesConfig,
}

/// Rules section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Allowlist patterns for rule keys.
    /// If non-empty, only allowlisted rules run.
    pub allow: Vec<String>,

    /// Denylist patterns for rule keys.
    pub deny: Vec<String>,
}

/// Discover the lintfix.toml config file.
///
/// Returns `None` if the project root has no config file.
pub fn discover_config(project_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a lintfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<LintfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<LintfixConfig> {
    let config: LintfixConfig = toml::from_str(contents).context("invalid TOML")?;
    if config.extensions.iter().flatten().any(|e| e.is_empty()) {
        anyhow::bail!("extensions must not contain an empty suffix");
    }
    Ok(config)
}

/// Load config from the project root, or return default if not found.
pub fn load_or_default(project_root: &Utf8Path) -> anyhow::Result<LintfixConfig> {
    match discover_config(project_root) {
        Some(path) => load_config(&path),
        None => Ok(LintfixConfig::default()),
    }
}

/// Builder for merging the config file with CLI arguments.
pub struct ConfigMerger {
    config: LintfixConfig,
}

impl ConfigMerger {
    pub fn new(config: LintfixConfig) -> Self {
        Self { config }
    }

    /// Merge with run command CLI arguments.
    ///
    /// CLI `allow` and `deny` lists extend the config file lists.
    pub fn merge_run_args(self, cli_allow: &[String], cli_deny: &[String]) -> RewriteSettings {
        let defaults = RewriteSettings::default();
        let LintfixConfig {
            roots,
            extensions,
            exclude,
            rules,
        } = self.config;

        let mut allow = rules.allow;
        let mut deny = rules.deny;
        for pattern in cli_allow {
            if !allow.contains(pattern) {
                allow.push(pattern.clone());
            }
        }
        for pattern in cli_deny {
            if !deny.contains(pattern) {
                deny.push(pattern.clone());
            }
        }

        RewriteSettings {
            roots: roots.unwrap_or(defaults.roots),
            extensions: extensions.unwrap_or(defaults.extensions),
            exclude,
            allow,
            deny,
            ..defaults
        }
    }
}
